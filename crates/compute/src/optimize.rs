use std::sync::atomic::{AtomicBool, Ordering};

use proximity_core::{Profile, ProximityError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::deck::{build_deck_search_query, leaf_deck_entries, optimization_progress_message, DeckEntry};

/// Parameters produced by an optimizer run over one search scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedParams {
    pub params: Vec<f64>,
    /// Number of review items the optimizer trained on.
    pub item_count: usize,
}

/// Backend that fits FSRS parameters from review history.
///
/// The call may be slow; [`optimize_decks`] checks for cancellation between
/// calls, never during one.
pub trait ParameterOptimizer {
    fn optimize(&self, search: &str) -> Result<OptimizedParams>;
}

/// Options for a batch of per-deck optimizations.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizeOptions {
    /// Include subdecks in each deck's search (and optimize parent decks).
    pub include_children: bool,
}

/// Optimize every deck and turn the results into profiles.
///
/// Without `include_children` only leaf decks are optimized, each scoped to
/// its own cards. `on_progress` receives a status line before each deck and
/// once after the last one. Decks that yield no parameters or no items are
/// skipped.
///
/// # Errors
/// * `Cancelled` if `cancel` is set between two decks
/// * any error returned by the optimizer
pub fn optimize_decks<O, F>(
    decks: &[DeckEntry],
    optimizer: &O,
    options: OptimizeOptions,
    cancel: &AtomicBool,
    mut on_progress: F,
) -> Result<Vec<Profile>>
where
    O: ParameterOptimizer + ?Sized,
    F: FnMut(&str),
{
    let targets = if options.include_children {
        decks.to_vec()
    } else {
        leaf_deck_entries(decks)
    };
    let total = targets.len();
    let mut profiles = Vec::with_capacity(total);

    on_progress(optimization_progress_message(0, total, None).as_str());

    for (done, deck) in targets.iter().enumerate() {
        if cancel.load(Ordering::SeqCst) {
            info!(done, total, "deck optimization cancelled");
            return Err(ProximityError::Cancelled);
        }
        on_progress(optimization_progress_message(done, total, Some(&deck.name)).as_str());

        let search = build_deck_search_query(deck.id, &deck.name, options.include_children);
        let result = optimizer.optimize(&search)?;

        if result.params.is_empty() || result.item_count == 0 {
            debug!(deck = %deck.name, items = result.item_count, "no parameters produced, skipping");
            continue;
        }
        profiles.push(Profile::new(deck.id, deck.name.clone(), result.params));
    }

    on_progress(optimization_progress_message(total, total, None).as_str());
    info!(decks = total, profiles = profiles.len(), "deck optimization finished");
    Ok(profiles)
}

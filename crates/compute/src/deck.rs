use std::collections::HashSet;

/// Separator between parent and child deck names.
pub const DECK_SEPARATOR: &str = "::";

/// Relearning steps must complete within one day.
pub const MAX_RELEARN_MINUTES: f64 = 1440.0;

/// A deck as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub id: i64,
    pub name: String,
}

impl DeckEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Keep only decks without subdecks, preserving input order.
pub fn leaf_deck_entries(entries: &[DeckEntry]) -> Vec<DeckEntry> {
    let mut ancestors: HashSet<String> = HashSet::new();
    for entry in entries {
        let parts: Vec<&str> = entry.name.split(DECK_SEPARATOR).collect();
        for idx in 1..parts.len() {
            ancestors.insert(parts[..idx].join(DECK_SEPARATOR));
        }
    }

    entries
        .iter()
        .filter(|entry| !ancestors.contains(&entry.name))
        .cloned()
        .collect()
}

/// Number of relearning steps that fit within one day.
pub fn count_relearning_steps_in_day(steps_minutes: &[f64]) -> usize {
    count_steps_within(steps_minutes, MAX_RELEARN_MINUTES)
}

/// Count leading steps whose running total stays below `limit_minutes`.
pub fn count_steps_within(steps_minutes: &[f64], limit_minutes: f64) -> usize {
    let mut accumulated = 0.0;
    steps_minutes
        .iter()
        .take_while(|&&step| {
            accumulated += step;
            accumulated < limit_minutes
        })
        .count()
}

/// Search query selecting the unsuspended cards of a deck.
pub fn build_deck_search_query(deck_id: i64, deck_name: &str, include_children: bool) -> String {
    if !include_children {
        return format!("did:{deck_id} -is:suspended");
    }

    let escaped = deck_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("deck:\"{escaped}\" -is:suspended")
}

/// Progress text shown while a batch of deck optimizations runs.
pub fn optimization_progress_message(done: usize, total: usize, deck_name: Option<&str>) -> String {
    let remaining = total.saturating_sub(done);
    match deck_name.filter(|name| !name.is_empty()) {
        Some(name) => format!(
            "Optimizing \"{name}\"\nCompleted: {done}/{total}\nRemaining: {remaining}"
        ),
        None => format!(
            "Preparing deck optimizations...\nCompleted: {done}/{total}\nRemaining: {remaining}"
        ),
    }
}

/// Entries of a distance-matrix row strictly below `threshold`.
///
/// Skips `self_index` and unset cells, sorts by distance then name
/// (case-insensitive), and formats each as `"Name (1.2345)"`.
pub fn similar_items_below_threshold(
    names: &[&str],
    distances_row: &[Option<f64>],
    self_index: usize,
    threshold: f64,
) -> Vec<String> {
    let mut pairs: Vec<(&str, f64)> = distances_row
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != self_index)
        .filter_map(|(idx, value)| Some((*names.get(idx)?, (*value)?)))
        .filter(|&(_, distance)| distance < threshold)
        .collect();

    pairs.sort_by(|a, b| {
        a.1.total_cmp(&b.1)
            .then_with(|| a.0.to_lowercase().cmp(&b.0.to_lowercase()))
    });

    pairs
        .into_iter()
        .map(|(name, distance)| format!("{name} ({distance:.4})"))
        .collect()
}

use proximity_compute::{is_fsrs6_valid_params, PairwiseDistances};
use proximity_core::{DistanceResult, ProfileStatus};

pub const RESULT_HEADERS: [&str; 5] = [
    "Preset",
    "FSRS Params",
    "Nearest Preset",
    "Distance",
    "Share Preset?",
];

/// Comma-separated weights with fixed precision.
pub fn format_params(weights: &[f64], decimals: usize) -> String {
    weights
        .iter()
        .map(|w| format!("{w:.decimals$}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_distance(distance: Option<f64>, decimals: usize) -> String {
    distance.map_or_else(|| "-".to_string(), |d| format!("{d:.decimals$}"))
}

/// One table row per analysis result.
pub fn result_row(result: &DistanceResult, decimals: usize) -> [String; 5] {
    let (nearest, distance, share) = match result.status {
        Some(status) => ("-".to_string(), status.to_string(), "-".to_string()),
        None => (
            result.nearest_name.clone().unwrap_or_else(|| "-".to_string()),
            format_distance(result.nearest_distance, decimals),
            result.should_share.label().to_string(),
        ),
    };

    [
        result.profile.name.clone(),
        format_params(&result.profile.weights, decimals),
        nearest,
        distance,
        share,
    ]
}

/// Display cells for the pairwise matrix.
pub fn matrix_cells(pairwise: &PairwiseDistances, decimals: usize) -> Vec<Vec<String>> {
    let valid: Vec<bool> = pairwise
        .profiles
        .iter()
        .map(|p| is_fsrs6_valid_params(&p.weights))
        .collect();

    (0..pairwise.len())
        .map(|row| {
            (0..pairwise.len())
                .map(|col| {
                    if !valid[row] || !valid[col] {
                        ProfileStatus::NotCanonicalParams.to_string()
                    } else {
                        format_distance(pairwise.get(row, col), decimals)
                    }
                })
                .collect()
        })
        .collect()
}

/// Left-aligned plain-text table; the first line is the header.
pub fn render_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.as_ref().chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers.to_vec()));
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(line(row.iter().map(|cell| cell.as_ref()).collect()));
    }
    lines
}

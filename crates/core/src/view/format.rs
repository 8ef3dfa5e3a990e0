//! Pure formatting helpers shared by every dashboard variant.
//!
//! Percentages use the standard library's exact decimal formatting of the
//! binary value, so ties round half-to-even on what the float actually holds.

pub const HEADLINE_MAX_CHARS: usize = 80;
pub const ELLIPSIS: &str = "...";

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// `0.713` -> `"71.3"`.
pub fn format_percent(fraction: f64) -> String {
    // Adding +0.0 turns -0.0 into 0.0.
    let pct = fraction * 100.0 + 0.0;
    format!("{pct:.1}")
}

pub fn truncate_headline(headline: &str) -> String {
    match headline.char_indices().nth(HEADLINE_MAX_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &headline[..cut]),
        None => headline.to_string(),
    }
}

/// `2.4` -> `"+2.4%"`, `-1.5` -> `"-1.5%"`, zero counts as non-negative.
pub fn format_signed_percent(value: f64) -> String {
    let value = value + 0.0;
    if value >= 0.0 {
        format!("+{value}%")
    } else {
        format!("{value}%")
    }
}

pub fn format_price(price: f64) -> String {
    format!("₹{price}")
}

pub fn sparkline(values: &[f64]) -> String {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    // Halved so the span stays finite across the whole f64 range.
    let half_span = max / 2.0 - min / 2.0;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() || half_span <= 0.0 {
                return SPARK_LEVELS[0];
            }
            let idx = (((v / 2.0 - min / 2.0) / half_span) * top).round() as usize;
            SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

use crate::domain::snapshot::Pick;

/// Picks whose ticker or signal label contains `search`, case-insensitively.
/// An empty search keeps everything in its original order.
pub fn filter_picks<'a, I>(picks: I, search: &str) -> Vec<&'a Pick>
where
    I: IntoIterator<Item = &'a Pick>,
{
    let needle = search.to_lowercase();
    picks
        .into_iter()
        .filter(|pick| matches_search(pick, &needle))
        .collect()
}

fn matches_search(pick: &Pick, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || pick.ticker.to_lowercase().contains(needle_lower)
        || pick.signal.label().to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::Signal;

    fn pick(ticker: &str, signal: &str) -> Pick {
        Pick {
            ticker: ticker.to_string(),
            signal: Signal::from(signal.to_string()),
            superposition: 0.5,
            probability: 0.5,
            price: 100.0,
            trend_past_7d: 0.0,
            news_sample: Vec::new(),
            buy_above: None,
            target: None,
            stop_loss: None,
            triggers: Vec::new(),
            history: Vec::new(),
        }
    }

    fn tickers(picks: &[&Pick]) -> Vec<String> {
        picks.iter().map(|p| p.ticker.clone()).collect()
    }

    #[test]
    fn matches_signal_label() {
        let picks = vec![pick("ABC", "HOLD"), pick("XYZ", "SELL")];
        assert_eq!(tickers(&filter_picks(&picks, "sell")), vec!["XYZ"]);
    }

    #[test]
    fn matches_ticker_substring_case_insensitively() {
        let picks = vec![
            pick("RELIANCE.NS", "BUY"),
            pick("TCS.NS", "HOLD"),
            pick("INFY.NS", "SELL"),
        ];
        assert_eq!(tickers(&filter_picks(&picks, "Tcs")), vec!["TCS.NS"]);
        assert_eq!(tickers(&filter_picks(&picks, ".ns")).len(), 3);
        assert!(filter_picks(&picks, "nothing").is_empty());
    }

    #[test]
    fn empty_search_keeps_all_in_order() {
        let picks = vec![pick("B", "BUY"), pick("A", "SELL"), pick("C", "HOLD")];
        let out = filter_picks(&picks, "");
        assert_eq!(out.len(), picks.len());
        assert!(out.iter().zip(&picks).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn filtering_is_idempotent() {
        let picks = vec![
            pick("HDFCBANK", "BUY"),
            pick("SBIN", "HOLD"),
            pick("ITC", "BUY"),
            pick("LT", "SELL"),
        ];
        for term in ["b", "BUY", "in", "", "zzz"] {
            let once = filter_picks(&picks, term);
            let twice = filter_picks(once.iter().copied(), term);
            assert_eq!(tickers(&once), tickers(&twice), "term={term}");
        }
    }

    #[test]
    fn unknown_labels_are_searchable() {
        let picks = vec![pick("ABC", "STRONG BUY"), pick("XYZ", "HOLD")];
        assert_eq!(tickers(&filter_picks(&picks, "strong")), vec!["ABC"]);
    }

    #[test]
    fn does_not_touch_the_source_list() {
        let picks = vec![pick("ABC", "HOLD"), pick("XYZ", "SELL")];
        let before = picks.clone();
        let _ = filter_picks(&picks, "xyz");
        assert_eq!(picks, before);
    }
}

use crate::domain::snapshot::PicksField;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Standard,
    LiveScanner,
}

/// Everything the two dashboard variants differ in.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub variant: Variant,
    pub title: &'static str,
    pub poll_interval: Duration,
    pub picks_field: PicksField,
    pub show_search: bool,
    pub show_history_chart: bool,
    /// Toggle the loading flag on scheduled and manual refreshes, not just on mount.
    pub loading_on_poll: bool,
    /// Drop completions older than the newest response already applied.
    pub keep_latest_issued: bool,
}

impl ViewConfig {
    pub fn standard() -> Self {
        Self {
            variant: Variant::Standard,
            title: "TOP 5 HIGH-MARGIN INVESTMENT PICKS",
            poll_interval: Duration::from_secs(60),
            picks_field: PicksField::Top5,
            show_search: false,
            show_history_chart: false,
            loading_on_poll: true,
            keep_latest_issued: false,
        }
    }

    /// 2s polling would flicker if every background refresh toggled loading.
    pub fn live_scanner() -> Self {
        Self {
            variant: Variant::LiveScanner,
            title: "LIVE MARKET SCANNER",
            poll_interval: Duration::from_secs(2),
            picks_field: PicksField::TopPicks,
            show_search: true,
            show_history_chart: true,
            loading_on_poll: false,
            keep_latest_issued: false,
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Standard => Self::standard(),
            Variant::LiveScanner => Self::live_scanner(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::standard()
    }
}

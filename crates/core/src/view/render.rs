//! Text rendering of the dashboard.
//!
//! `render_to_string` is a pure function of the state and the view config; the
//! binary prints its output on every state change and tests assert on it.

use crate::domain::snapshot::{Pick, SignalClass};
use crate::view::config::ViewConfig;
use crate::view::format::{
    format_percent, format_price, format_signed_percent, sparkline, truncate_headline,
};
use crate::view::state::DashboardState;

const APP_TITLE: &str = "QUANTINTEL DASHBOARD v3.0";
const APP_SUBTITLE: &str = "AI-DRIVEN MARKET SUPERPOSITION ENGINE";
const STATUS_PLACEHOLDER: &str = "Checking Market...";
const FACTOR_BAR_WIDTH: usize = 20;
const CONNECTION_FACTORS: [(&str, u8); 3] = [
    ("AI Quantitative Prediction", 85),
    ("News Sentiment Analysis", 70),
    ("Volume Anomaly Factor", 45),
];
const DISCLAIMER: &str = "DISCLAIMER: This is an AI-driven analytical dashboard. Always consult a financial advisor before making investment decisions.";

/// Display-ready strings for one pick.
#[derive(Debug, Clone, PartialEq)]
pub struct PickCard {
    pub ticker: String,
    pub badge: String,
    pub class: SignalClass,
    pub superposition: String,
    pub probability: String,
    pub price: String,
    pub trend: String,
    pub trend_up: bool,
    pub news: Vec<String>,
    pub levels: Option<String>,
    pub triggers: Option<String>,
    pub history: Option<String>,
}

impl PickCard {
    pub fn from_pick(pick: &Pick, extended: bool) -> Self {
        let levels = [
            ("Buy above", pick.buy_above),
            ("Target", pick.target),
            ("Stop loss", pick.stop_loss),
        ]
        .into_iter()
        .filter_map(|(label, v)| v.map(|v| format!("{label} {}", format_price(v))))
        .collect::<Vec<_>>();

        let history: Vec<f64> = pick.history.iter().map(|p| p.price).collect();

        Self {
            ticker: pick.ticker.clone(),
            badge: pick.signal.label().to_string(),
            class: pick.signal.class(),
            superposition: format!("SUPERPOSITION: {}%", format_percent(pick.superposition)),
            probability: format!("{}%", format_percent(pick.probability)),
            price: format_price(pick.price),
            trend: format_signed_percent(pick.trend_past_7d),
            trend_up: pick.trend_past_7d >= 0.0,
            news: pick.news_sample.iter().map(|n| truncate_headline(n)).collect(),
            levels: (extended && !levels.is_empty()).then(|| levels.join(" | ")),
            triggers: (extended && !pick.triggers.is_empty()).then(|| pick.triggers.join(", ")),
            history: (extended && !history.is_empty()).then(|| sparkline(&history)),
        }
    }

    fn lines(&self) -> Vec<String> {
        let marker = match self.class {
            SignalClass::Buy => '▲',
            SignalClass::Sell => '▼',
            SignalClass::Hold => '●',
        };
        let trend_marker = if self.trend_up { "up" } else { "down" };

        let mut out = vec![
            format!(
                "[{}] {marker} {} ({})   {}",
                self.ticker,
                self.badge,
                self.class.word(),
                self.superposition
            ),
            format!(
                "  Current Price {} | 7D Trend {} ({trend_marker}) | UP Probability {}",
                self.price, self.trend, self.probability
            ),
        ];
        if let Some(levels) = &self.levels {
            out.push(format!("  {levels}"));
        }
        if let Some(triggers) = &self.triggers {
            out.push(format!("  Triggers: {triggers}"));
        }
        if let Some(history) = &self.history {
            out.push(format!("  History {history}"));
        }
        if !self.news.is_empty() {
            out.push("  GEOPOLITICAL NEWS PULSE".to_string());
            out.extend(self.news.iter().map(|n| format!("  • {n}")));
        }
        out
    }
}

pub fn render_to_string(state: &DashboardState, config: &ViewConfig) -> String {
    let mut lines = Vec::new();

    if state.is_loading() && state.snapshot().is_none() {
        lines.push("INITIALIZING SUPER-INTELLIGENCE".to_string());
        lines.push("Correlating global geopolitics with Nifty market data...".to_string());
        return lines.join("\n") + "\n";
    }

    let snapshot = state.snapshot();
    let status = snapshot
        .map(|s| s.market_status.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(STATUS_PLACEHOLDER);
    let session = match snapshot.map(|s| s.is_open) {
        Some(true) => "open",
        _ => "closed",
    };
    let refresh = if state.is_loading() { "REFRESHING" } else { "REFRESH" };

    lines.push(format!("{APP_TITLE} | {APP_SUBTITLE}"));
    lines.push(format!("[{status}] ({session})  [{refresh}]"));
    if let Some(at) = state.refreshed_at() {
        lines.push(format!("Last update {}", at.format("%H:%M:%S UTC")));
    }
    lines.push(String::new());

    let visible = state.visible_picks(config);
    lines.push(config.title.to_string());
    if config.show_search {
        let total = snapshot.map(|s| s.picks(config.picks_field).len()).unwrap_or(0);
        lines.push(format!(
            "Search: \"{}\" ({} of {total})",
            state.search(),
            visible.len()
        ));
    }
    for pick in visible {
        lines.push(String::new());
        lines.extend(PickCard::from_pick(pick, config.show_history_chart).lines());
    }
    lines.push(String::new());

    lines.push("GLOBAL CONTEXT ENGINE".to_string());
    let summary = if snapshot.is_some_and(|s| s.is_open) {
        "Live signals are being generated based on real-time price action and news flow."
    } else {
        "Market is currently closed. Displaying predictive signals for the next opening session based on overnight global news."
    };
    lines.push(format!(
        "The system is currently correlating India Stock Market trends with Global Geopolitics. {summary}"
    ));
    lines.push("CONNECTION FACTORS".to_string());
    lines.extend(
        CONNECTION_FACTORS
            .iter()
            .map(|&(label, pct)| format!("  {label:<28}{} {pct}%", factor_bar(pct))),
    );
    lines.push(DISCLAIMER.to_string());

    if let Some(error) = state.error() {
        lines.push(String::new());
        lines.push(format!("!! {error}"));
    }

    lines.join("\n") + "\n"
}

fn factor_bar(pct: u8) -> String {
    let filled = (usize::from(pct.min(100)) * FACTOR_BAR_WIDTH + 50) / 100;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(FACTOR_BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::Snapshot;
    use crate::ingest::error::FetchError;
    use crate::view::state::CONNECTION_ERROR;
    use serde_json::json;

    fn scenario_snapshot() -> Snapshot {
        serde_json::from_value(json!({
            "is_open": true,
            "market_status": "OPEN",
            "top_5": [{
                "ticker": "TCS",
                "signal": "BUY",
                "superposition": 0.62,
                "probability": 0.713,
                "price": 3500,
                "trend_past_7d": 2.4,
                "news_sample": ["a".repeat(90)]
            }]
        }))
        .unwrap()
    }

    fn loaded(snapshot: Snapshot) -> DashboardState {
        let mut state = DashboardState::default();
        let t = state.begin_refresh(false, true);
        state.complete_refresh(t, Ok(snapshot), false);
        state
    }

    #[test]
    fn card_shows_formatted_fields() {
        let snapshot = scenario_snapshot();
        let card = PickCard::from_pick(&snapshot.top_5.as_ref().unwrap()[0], false);

        assert_eq!(card.ticker, "TCS");
        assert_eq!(card.badge, "BUY");
        assert_eq!(card.class, SignalClass::Buy);
        assert_eq!(card.superposition, "SUPERPOSITION: 62.0%");
        assert_eq!(card.probability, "71.3%");
        assert_eq!(card.trend, "+2.4%");
        assert!(card.trend_up);
        assert_eq!(card.news, vec![format!("{}...", "a".repeat(80))]);
        assert_eq!(card.levels, None);
    }

    #[test]
    fn rendered_dashboard_contains_the_card() {
        let out = render_to_string(&loaded(scenario_snapshot()), &ViewConfig::standard());

        assert!(out.contains("[OPEN] (open)"));
        assert!(out.contains("[TCS] ▲ BUY (buy)"));
        assert!(out.contains("SUPERPOSITION: 62.0%"));
        assert!(out.contains("UP Probability 71.3%"));
        assert!(out.contains("7D Trend +2.4% (up)"));
        assert!(out.contains(&format!("• {}...", "a".repeat(80))));
        assert!(!out.contains(&"a".repeat(81)));
        assert!(out.contains("Live signals are being generated"));
        assert!(!out.contains(CONNECTION_ERROR));
    }

    #[test]
    fn extended_card_shows_levels_triggers_and_history() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "market_status": "Closed (Weekend)",
            "is_open": false,
            "top_picks": [{
                "ticker": "SBIN",
                "signal": "SELL",
                "superposition": 0.3,
                "probability": 0.2,
                "price": 800,
                "trend_past_7d": -3.5,
                "news_sample": [],
                "buy_above": 820,
                "target": 760,
                "stop_loss": 835.5,
                "triggers": ["RSI > 70", "MACD below signal"],
                "history": [{"price": 810}, {"price": 805}, {"price": 800}]
            }]
        }))
        .unwrap();

        let out = render_to_string(&loaded(snapshot), &ViewConfig::live_scanner());
        assert!(out.contains("[SBIN] ▼ SELL (sell)"));
        assert!(out.contains("7D Trend -3.5% (down)"));
        assert!(out.contains("Buy above ₹820 | Target ₹760 | Stop loss ₹835.5"));
        assert!(out.contains("Triggers: RSI > 70, MACD below signal"));
        assert!(out.contains("History █▅▁"));
        assert!(out.contains("Search: \"\" (1 of 1)"));
        assert!(out.contains("Market is currently closed."));
        assert!(!out.contains("GEOPOLITICAL NEWS PULSE"));
    }

    #[test]
    fn loading_screen_before_first_snapshot() {
        let mut state = DashboardState::default();
        state.begin_refresh(false, true);
        let out = render_to_string(&state, &ViewConfig::standard());
        assert!(out.starts_with("INITIALIZING SUPER-INTELLIGENCE"));
    }

    #[test]
    fn error_banner_sits_next_to_stale_data() {
        let mut state = loaded(scenario_snapshot());
        let t = state.begin_refresh(true, true);
        state.complete_refresh(t, Err(FetchError::new("request", "refused")), false);

        let out = render_to_string(&state, &ViewConfig::standard());
        assert!(out.contains("[TCS] ▲ BUY"));
        assert!(out.contains(&format!("!! {CONNECTION_ERROR}")));
    }

    #[test]
    fn first_load_failure_shows_placeholder_status() {
        let mut state = DashboardState::default();
        let t = state.begin_refresh(false, true);
        state.complete_refresh(t, Err(FetchError::new("request", "refused")), false);

        let out = render_to_string(&state, &ViewConfig::standard());
        assert!(out.contains("[Checking Market...] (closed)"));
        assert!(out.contains(CONNECTION_ERROR));
    }

    #[test]
    fn unknown_signal_renders_as_hold() {
        let mut snapshot = scenario_snapshot();
        snapshot.top_5.as_mut().unwrap()[0].signal = "ACCUMULATE".to_string().into();

        let out = render_to_string(&loaded(snapshot), &ViewConfig::standard());
        assert!(out.contains("[TCS] ● ACCUMULATE (hold)"));
    }

    #[test]
    fn context_panel_lists_connection_factors() {
        let out = render_to_string(&loaded(scenario_snapshot()), &ViewConfig::standard());
        assert!(out.contains("CONNECTION FACTORS"));
        assert!(out.contains("AI Quantitative Prediction"));
        assert!(out.contains(&format!("{}{} 85%", "█".repeat(17), "░".repeat(3))));
        assert!(out.contains("News Sentiment Analysis"));
        assert!(out.contains(&format!("{}{} 45%", "█".repeat(9), "░".repeat(11))));
    }

    #[test]
    fn factor_bar_is_fixed_width() {
        assert_eq!(factor_bar(0), "░".repeat(20));
        assert_eq!(factor_bar(100), "█".repeat(20));
        assert_eq!(factor_bar(70).chars().count(), 20);
    }
}

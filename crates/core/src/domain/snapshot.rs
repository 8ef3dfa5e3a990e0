use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// One full `/dashboard` payload. Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub market_status: String,
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_5: Option<Vec<Pick>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_picks: Option<Vec<Pick>>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub ticker: String,
    pub signal: Signal,
    pub superposition: f64,
    pub probability: f64,
    pub price: f64,
    pub trend_past_7d: f64,
    #[serde(default)]
    pub news_sample: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_above: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<PricePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
}

/// Trading recommendation attached to a pick.
///
/// Labels outside BUY/SELL/HOLD are kept verbatim in `Other` so they can still
/// be displayed and searched; they present as hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalClass {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn label(&self) -> &str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
            Signal::Other(label) => label,
        }
    }

    pub fn class(&self) -> SignalClass {
        match self {
            Signal::Buy => SignalClass::Buy,
            Signal::Sell => SignalClass::Sell,
            Signal::Hold | Signal::Other(_) => SignalClass::Hold,
        }
    }
}

impl From<String> for Signal {
    fn from(label: String) -> Self {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("BUY") {
            Signal::Buy
        } else if trimmed.eq_ignore_ascii_case("SELL") {
            Signal::Sell
        } else if trimmed.eq_ignore_ascii_case("HOLD") {
            Signal::Hold
        } else {
            Signal::Other(label)
        }
    }
}

impl From<Signal> for String {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl SignalClass {
    pub fn word(self) -> &'static str {
        match self {
            SignalClass::Buy => "buy",
            SignalClass::Sell => "sell",
            SignalClass::Hold => "hold",
        }
    }
}

/// Which snapshot field carries the pick collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PicksField {
    Top5,
    TopPicks,
}

impl PicksField {
    pub fn field_name(self) -> &'static str {
        match self {
            PicksField::Top5 => "top_5",
            PicksField::TopPicks => "top_picks",
        }
    }
}

impl Snapshot {
    /// Picks under the preferred field, falling back to the other field when the
    /// backend only sent that one.
    pub fn picks(&self, preferred: PicksField) -> &[Pick] {
        let (first, second) = match preferred {
            PicksField::Top5 => (&self.top_5, &self.top_picks),
            PicksField::TopPicks => (&self.top_picks, &self.top_5),
        };

        first
            .as_deref()
            .or(second.as_deref())
            .unwrap_or_default()
    }
}

// The backend stamps snapshots with an ISO-8601 time; a bad stamp must not
// invalidate an otherwise usable snapshot.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok()))
}

use std::fmt;

/// Why a snapshot fetch failed. The view collapses every variant of this into one
/// user-facing message; `stage` and `detail` exist for logs.
#[derive(Debug, Clone)]
pub struct FetchError {
    pub stage: &'static str,
    pub detail: String,
}

impl FetchError {
    pub fn new(stage: &'static str, detail: impl Into<String>) -> Self {
        Self {
            stage,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snapshot fetch failed (stage={}): {}", self.stage, self.detail)
    }
}

impl std::error::Error for FetchError {}

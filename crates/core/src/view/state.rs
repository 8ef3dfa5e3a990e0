use crate::domain::snapshot::{Pick, Snapshot};
use crate::ingest::error::FetchError;
use crate::view::config::ViewConfig;
use crate::view::filter::filter_picks;
use chrono::{DateTime, Utc};

pub const CONNECTION_ERROR: &str =
    "Failed to connect to Intelligence Engine. Ensure backend is running.";

/// The dashboard's only mutable state. One owner drives it through
/// `begin_refresh`/`complete_refresh` and the search setters.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    snapshot: Option<Snapshot>,
    loading: bool,
    error: Option<&'static str>,
    search: String,
    last_issued: u64,
    last_applied: u64,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Handed out when a fetch is issued and given back when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    pub seq: u64,
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Failed,
    /// Dropped because a newer response was already applied.
    Superseded,
}

impl DashboardState {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn begin_refresh(&mut self, force: bool, toggle_loading: bool) -> RefreshTicket {
        self.last_issued += 1;
        if toggle_loading {
            self.loading = true;
        }
        RefreshTicket {
            seq: self.last_issued,
            force,
        }
    }

    /// Apply a resolved fetch. Without `keep_latest_issued` the last response to
    /// resolve wins, whatever order the requests were issued in.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Snapshot, FetchError>,
        keep_latest_issued: bool,
    ) -> RefreshOutcome {
        self.loading = false;

        if keep_latest_issued && ticket.seq < self.last_applied {
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.error = None;
                self.last_applied = ticket.seq;
                self.refreshed_at = Some(Utc::now());
                RefreshOutcome::Applied
            }
            Err(_) => {
                self.error = Some(CONNECTION_ERROR);
                RefreshOutcome::Failed
            }
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Picks the view should show right now: the configured field, narrowed by
    /// the search term when the variant has search.
    pub fn visible_picks(&self, config: &ViewConfig) -> Vec<&Pick> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };
        let picks = snapshot.picks(config.picks_field);

        if config.show_search {
            filter_picks(picks, &self.search)
        } else {
            picks.iter().collect()
        }
    }
}

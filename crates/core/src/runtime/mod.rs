//! Polling runtime for the dashboard view.
//!
//! A single actor task owns [`DashboardState`]. Callers talk to it through a
//! [`Dashboard`] handle and observe it through a `watch` channel of copies.

pub mod timer;

use crate::domain::snapshot::Snapshot;
use crate::ingest::error::FetchError;
use crate::ingest::SnapshotSource;
use crate::view::config::ViewConfig;
use crate::view::state::{DashboardState, RefreshOutcome, RefreshTicket};
use std::sync::Arc;
use timer::PollTimer;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug)]
enum Command {
    Refresh,
    SetSearch(String),
    ClearSearch,
    Shutdown,
}

struct Completion {
    ticket: RefreshTicket,
    result: Result<Snapshot, FetchError>,
}

/// Handle to a running dashboard. Dropping it tears the dashboard down.
pub struct Dashboard {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<DashboardState>,
    task: JoinHandle<()>,
}

impl Dashboard {
    /// Mount the dashboard: one cached fetch right away, then a forced fetch
    /// every `config.poll_interval`.
    pub fn spawn(source: Arc<dyn SnapshotSource>, config: ViewConfig) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(DashboardState::default());

        let actor = Actor {
            source,
            config,
            state: DashboardState::default(),
            published: state_tx,
        };
        let task = tokio::spawn(actor.run(command_rx));

        Self {
            commands,
            state,
            task,
        }
    }

    /// Out-of-band forced refresh. The poll schedule is left as is.
    pub fn refresh(&self) {
        self.send(Command::Refresh);
    }

    pub fn set_search(&self, term: impl Into<String>) {
        self.send(Command::SetSearch(term.into()));
    }

    pub fn clear_search(&self) {
        self.send(Command::ClearSearch);
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.clone()
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Disarm the timer and wait for the actor to stop. Fetches still in flight
    /// are left to finish and their results are dropped.
    pub async fn shutdown(self) {
        self.send(Command::Shutdown);
        let task = self.task;
        if let Err(err) = task.await {
            tracing::error!(error = %err, "dashboard task ended abnormally");
        }
    }

    fn send(&self, cmd: Command) {
        if self.commands.send(cmd).is_err() {
            tracing::debug!("dashboard already torn down; command ignored");
        }
    }
}

struct Actor {
    source: Arc<dyn SnapshotSource>,
    config: ViewConfig,
    state: DashboardState,
    published: watch::Sender<DashboardState>,
}

impl Actor {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
        let (tick_tx, mut ticks) = mpsc::channel::<()>(1);

        tracing::info!(
            source = self.source.source_name(),
            variant = ?self.config.variant,
            poll_interval = ?self.config.poll_interval,
            "dashboard mounted"
        );

        // Mount refresh prefers the backend's cached snapshot for first paint.
        self.issue(false, true, &done_tx);
        let timer = PollTimer::arm(self.config.poll_interval, tick_tx);

        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(Command::Refresh) => {
                        let toggle = self.config.loading_on_poll;
                        self.issue(true, toggle, &done_tx);
                    }
                    Some(Command::SetSearch(term)) => {
                        self.state.set_search(term);
                        self.publish();
                    }
                    Some(Command::ClearSearch) => {
                        self.state.clear_search();
                        self.publish();
                    }
                    Some(Command::Shutdown) | None => break,
                },
                Some(()) = ticks.recv() => {
                    let toggle = self.config.loading_on_poll;
                    self.issue(true, toggle, &done_tx);
                }
                Some(done) = done_rx.recv() => self.complete(done),
            }
        }

        timer.disarm();
        tracing::info!("dashboard torn down");
    }

    fn issue(&mut self, force: bool, toggle_loading: bool, done_tx: &mpsc::UnboundedSender<Completion>) {
        let ticket = self.state.begin_refresh(force, toggle_loading);
        self.publish();

        let source = Arc::clone(&self.source);
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_snapshot(ticket.force).await;
            // Receiver is gone after teardown; the result is dropped.
            let _ = done_tx.send(Completion { ticket, result });
        });
    }

    fn complete(&mut self, done: Completion) {
        let seq = done.ticket.seq;
        if let Err(err) = &done.result {
            tracing::warn!(seq, stage = err.stage, error = %err, "dashboard refresh failed");
        }

        match self
            .state
            .complete_refresh(done.ticket, done.result, self.config.keep_latest_issued)
        {
            RefreshOutcome::Applied => tracing::debug!(seq, "snapshot applied"),
            RefreshOutcome::Failed => {}
            RefreshOutcome::Superseded => tracing::debug!(seq, "stale snapshot dropped"),
        }
        self.publish();
    }

    fn publish(&self) {
        self.published.send_replace(self.state.clone());
    }
}

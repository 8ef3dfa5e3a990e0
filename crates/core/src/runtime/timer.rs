use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Repeating poll timer. Armed on construction; stops on `disarm`, on drop, or
/// once the tick receiver is gone.
#[derive(Debug)]
pub struct PollTimer {
    handle: JoinHandle<()>,
}

impl PollTimer {
    pub fn arm(period: Duration, ticks: mpsc::Sender<()>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                match ticks.try_send(()) {
                    Ok(()) => {}
                    // Previous tick not consumed yet; don't stack refreshes.
                    Err(mpsc::error::TrySendError::Full(())) => {
                        tracing::debug!("poll tick skipped; previous tick still pending");
                    }
                    Err(mpsc::error::TrySendError::Closed(())) => break,
                }
            }
        });

        Self { handle }
    }

    pub fn disarm(&self) {
        self.handle.abort();
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_every_period_after_the_first() {
        let (tx, mut rx) = mpsc::channel(1);
        let start = Instant::now();
        let _timer = PollTimer::arm(Duration::from_secs(60), tx);

        rx.recv().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_secs(60));
        rx.recv().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_secs(120));
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(1);
        let timer = PollTimer::arm(Duration::from_secs(2), tx);
        rx.recv().await.unwrap();

        timer.disarm();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!timer.is_armed());
        // The aborted task dropped its sender.
        assert_eq!(rx.recv().await, None);
    }
}

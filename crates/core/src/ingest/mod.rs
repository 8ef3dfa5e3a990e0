pub mod error;
pub mod provider;

use crate::domain::snapshot::Snapshot;
use error::FetchError;

#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    /// Fetch one full snapshot. `force` asks the backend to bypass its cache.
    async fn fetch_snapshot(&self, force: bool) -> Result<Snapshot, FetchError>;
}

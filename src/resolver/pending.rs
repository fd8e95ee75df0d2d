//! Handle to a resolution running on the tokio runtime

use tokio::task::JoinHandle;

use super::{
    ResolveError,
    ResolvedTextBundle,
};

/// In-flight resolution.
///
/// Dropping the handle aborts the task, so a dismissed widget does not leave requests running.
#[derive(Debug)]
pub struct PendingResolution {
    /// Spawned resolution task
    handle: JoinHandle<Result<ResolvedTextBundle, ResolveError>>,
}

impl PendingResolution {
    pub(super) const fn new(handle: JoinHandle<Result<ResolvedTextBundle, ResolveError>>) -> Self {
        Self { handle }
    }

    /// Aborts the in-flight fetches. No result is produced afterwards.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the result.
    ///
    /// # Errors
    /// - [`ResolveError::BaseFetchFailed`] from the resolution itself
    /// - [`ResolveError::Cancelled`] if [`cancel`](Self::cancel) was called first
    /// - [`ResolveError::TaskFailed`] if the task panicked
    pub async fn wait(mut self) -> Result<ResolvedTextBundle, ResolveError> {
        match (&mut self.handle).await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ResolveError::Cancelled),
            Err(e) => Err(ResolveError::TaskFailed(e.to_string())),
        }
    }
}

impl Drop for PendingResolution {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

//! Debounced, cancellable chart queries. Every request takes a new generation,
//! only the newest one is ever returned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::core::backend::ProjectBackend;
use crate::error::LoomError;
use crate::model::{ChartColumn, ChartData, RecordId};
use crate::opts::ChartOpts;

#[derive(Clone)]
pub struct PreviewChannel {
    backend: Arc<dyn ProjectBackend>,
    project_id: RecordId,
    debounce: Duration,
    generation: Arc<AtomicU64>,
}

impl PreviewChannel {
    pub fn new(
        backend: Arc<dyn ProjectBackend>,
        project_id: RecordId,
        debounce: Duration,
    ) -> PreviewChannel {
        PreviewChannel {
            backend,
            project_id,
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Chart data for `opts` once input has been quiet for the debounce
    /// interval. `None` if a newer request or `cancel` superseded this one,
    /// before or after it was sent.
    pub async fn request(&self, opts: ChartOpts) -> Result<Option<ChartData>, LoomError> {
        opts.validate()?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(generation) {
            log::debug!("preview {generation} superseded before sending");
            return Ok(None);
        }

        let data = self.backend.chart_data(&self.project_id, &opts).await?;
        if !self.is_current(generation) {
            log::debug!("dropping late preview {generation}");
            return Ok(None);
        }
        Ok(Some(data))
    }

    /// Supersede whatever is pending
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn columns(&self) -> Result<Vec<ChartColumn>, LoomError> {
        self.backend.chart_columns(&self.project_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ChartType;
    use crate::test::{self, FakeBackend};

    fn channel(backend: Arc<FakeBackend>) -> PreviewChannel {
        PreviewChannel::new(
            backend,
            RecordId::from(test::TEST_PROJECT_ID),
            Duration::from_millis(300),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_request_is_sent() -> Result<(), LoomError> {
        let backend = Arc::new(FakeBackend::new(3, 10));
        let preview = channel(backend.clone());

        let first = preview.request(ChartOpts::new(ChartType::Bar, "c0"));
        let second = preview.request(ChartOpts::new(ChartType::Bar, "c1"));
        let (first, second) = tokio::join!(first, second);

        assert!(first?.is_none());
        let second = second?.unwrap();
        assert_eq!(second.x_column, "c1");
        assert_eq!(backend.count_calls("chart_data"), 1);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_after_quiet_period_is_sent() -> Result<(), LoomError> {
        let backend = Arc::new(FakeBackend::new(3, 10));
        let preview = channel(backend.clone());

        assert!(preview
            .request(ChartOpts::new(ChartType::Line, "c0"))
            .await?
            .is_some());
        assert!(preview
            .request(ChartOpts::new(ChartType::Line, "c2"))
            .await?
            .is_some());
        assert_eq!(backend.count_calls("chart_data"), 2);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() -> Result<(), LoomError> {
        let backend = Arc::new(FakeBackend::new(3, 10));
        let preview = channel(backend.clone());

        let pending = preview.request(ChartOpts::new(ChartType::Pie, "c0"));
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            preview.cancel();
        };
        let (pending, _) = tokio::join!(pending, cancel);
        assert!(pending?.is_none());
        assert_eq!(backend.count_calls("chart_data"), 0);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_opts_rejected_locally() {
        let backend = Arc::new(FakeBackend::new(3, 10));
        let preview = channel(backend.clone());
        let result = preview.request(ChartOpts::new(ChartType::Scatter, "c0")).await;
        assert!(matches!(result, Err(LoomError::Validation(_))));
        assert!(backend.calls().is_empty());
    }
}

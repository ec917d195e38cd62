use async_trait::async_trait;

use crate::domain::payment_processor::ProcessorEndpoint;

/// Consecutive-failure guard, one circuit per processor.
#[async_trait]
pub trait CircuitBreaker: Send + Sync + 'static {
	async fn is_open(&self, endpoint: &ProcessorEndpoint) -> bool;
	async fn record_failure(&self, endpoint: &ProcessorEndpoint);
	async fn record_success(&self, endpoint: &ProcessorEndpoint);
}

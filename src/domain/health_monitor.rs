use async_trait::async_trait;

use crate::domain::health_status::HealthStatus;
use crate::domain::payment_processor::ProcessorEndpoint;

/// Source of processor health used for routing.
///
/// Implementations must never fail: an unreachable processor is reported as
/// unhealthy.
#[async_trait]
pub trait HealthMonitor: Send + Sync + 'static {
	async fn check_health(&self, endpoint: &ProcessorEndpoint) -> HealthStatus;
}

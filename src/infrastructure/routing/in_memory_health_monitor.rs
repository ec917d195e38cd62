use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use log::{error, info, warn};
use tokio::sync::Mutex as ProbeLock;
use tokio::time::{Instant, timeout};

use crate::domain::health_monitor::HealthMonitor;
use crate::domain::health_status::HealthStatus;
use crate::domain::payment_processor::{ProcessorEndpoint, ProcessorName};
use crate::domain::processor_client::{PaymentProcessorClient, ProcessorCallError};
use crate::infrastructure::metrics;

/// Minimum time between two live probes of the same processor.
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(5);
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
struct CachedHealth {
	status:    HealthStatus,
	polled_at: Instant,
}

/// Rate-limited, process-local view of processor health.
///
/// The result of every live probe is cached, healthy or not, so a processor
/// is never probed more than once per `HEALTH_CHECK_INTERVAL`. Concurrent
/// callers that find the cache stale wait for the single probe in flight.
#[derive(Clone)]
pub struct InMemoryHealthMonitor<C: PaymentProcessorClient> {
	processor_client: C,
	statuses:         Arc<RwLock<HashMap<ProcessorName, CachedHealth>>>,
	probe_locks:      Arc<Mutex<HashMap<ProcessorName, Arc<ProbeLock<()>>>>>,
	check_interval:   Duration,
}

impl<C: PaymentProcessorClient> InMemoryHealthMonitor<C> {
	pub fn new(processor_client: C) -> Self {
		Self::with_interval(processor_client, HEALTH_CHECK_INTERVAL)
	}

	pub fn with_interval(processor_client: C, check_interval: Duration) -> Self {
		Self {
			processor_client,
			statuses: Arc::new(RwLock::new(HashMap::new())),
			probe_locks: Arc::new(Mutex::new(HashMap::new())),
			check_interval,
		}
	}

	/// Last observed status, regardless of its age.
	pub fn last_status(&self, processor: ProcessorName) -> Option<HealthStatus> {
		self.statuses
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(&processor)
			.map(|cached| cached.status.clone())
	}

	fn fresh_status(&self, processor: ProcessorName) -> Option<HealthStatus> {
		self.statuses
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(&processor)
			.filter(|cached| cached.polled_at.elapsed() < self.check_interval)
			.map(|cached| cached.status.clone())
	}

	fn probe_lock(&self, processor: ProcessorName) -> Arc<ProbeLock<()>> {
		self.probe_locks
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.entry(processor)
			.or_default()
			.clone()
	}

	fn store(&self, processor: ProcessorName, status: HealthStatus) {
		self.statuses
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(processor, CachedHealth {
				status,
				polled_at: Instant::now(),
			});
	}

	async fn probe(&self, endpoint: &ProcessorEndpoint) -> HealthStatus {
		if endpoint.simulated {
			return HealthStatus::healthy();
		}

		let result = timeout(
			HEALTH_PROBE_TIMEOUT,
			self.processor_client.probe_health(endpoint),
		)
		.await
		.unwrap_or(Err(ProcessorCallError::Timeout));

		match result {
			Ok(report) if report.is_healthy() => HealthStatus::healthy(),
			Ok(report) => {
				warn!(
					"{} processor reported itself unhealthy: {}",
					endpoint.name,
					report.describe()
				);
				HealthStatus::unhealthy(format!("reported {}", report.describe()))
			}
			Err(e) => {
				error!("Failed to check health of {} processor: {e}", endpoint.name);
				HealthStatus::unhealthy(e.to_string())
			}
		}
	}
}

#[async_trait]
impl<C: PaymentProcessorClient> HealthMonitor for InMemoryHealthMonitor<C> {
	async fn check_health(&self, endpoint: &ProcessorEndpoint) -> HealthStatus {
		if let Some(status) = self.fresh_status(endpoint.name) {
			return status;
		}

		let probe_lock = self.probe_lock(endpoint.name);
		let _probing = probe_lock.lock().await;
		if let Some(status) = self.fresh_status(endpoint.name) {
			return status;
		}

		let status = self.probe(endpoint).await;
		if !status.is_healthy() {
			metrics::record_health_check_failure(endpoint.name);
		}
		info!("Updated health for {}: {:?}", endpoint.name, status.status);

		self.store(endpoint.name, status.clone());
		status
	}
}

use log::debug;

use crate::domain::health_monitor::HealthMonitor;
use crate::domain::payment_processor::{ProcessorEndpoint, ProcessorEndpoints};

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
	pub endpoint:   ProcessorEndpoint,
	pub is_primary: bool,
}

/// Picks the preferred processor for a payment from current health.
///
/// Primary when healthy, else secondary when healthy, else primary as a
/// best effort. Circuit state is not considered here.
#[derive(Clone)]
pub struct ProcessorSelector<H: HealthMonitor> {
	health_monitor: H,
	endpoints:      ProcessorEndpoints,
}

impl<H: HealthMonitor> ProcessorSelector<H> {
	pub fn new(health_monitor: H, endpoints: ProcessorEndpoints) -> Self {
		Self {
			health_monitor,
			endpoints,
		}
	}

	pub fn endpoints(&self) -> &ProcessorEndpoints {
		&self.endpoints
	}

	pub async fn select(&self) -> Selection {
		let (primary_health, secondary_health) = tokio::join!(
			self.health_monitor.check_health(&self.endpoints.primary),
			self.health_monitor.check_health(&self.endpoints.secondary)
		);

		let endpoint = if primary_health.is_healthy() {
			&self.endpoints.primary
		} else if secondary_health.is_healthy() {
			&self.endpoints.secondary
		} else {
			debug!("No healthy processor, falling back to primary");
			&self.endpoints.primary
		};

		Selection {
			endpoint:   endpoint.clone(),
			is_primary: endpoint.is_primary(),
		}
	}
}

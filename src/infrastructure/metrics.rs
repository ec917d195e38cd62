//! Prometheus metrics for payment routing.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::domain::payment::PaymentStatus;
use crate::domain::payment_processor::ProcessorName;

pub mod names {
	pub const PAYMENT_REQUESTS_TOTAL: &str = "payment_requests_total";
	pub const PAYMENT_DURATION_SECONDS: &str = "payment_duration_seconds";
	pub const HEALTH_CHECK_FAILURES_TOTAL: &str = "health_check_failures_total";
	pub const ACTIVE_CONNECTIONS: &str = "active_connections";
}

/// Installs the global recorder. Must be called once, before serving.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
	PrometheusBuilder::new().install_recorder()
}

pub fn record_payment_request(processor: ProcessorName, status: PaymentStatus) {
	counter!(
		names::PAYMENT_REQUESTS_TOTAL,
		"processor" => processor.as_str(),
		"status" => status.as_str()
	)
	.increment(1);
}

pub fn record_payment_duration(processor: ProcessorName, duration_secs: f64) {
	histogram!(names::PAYMENT_DURATION_SECONDS, "processor" => processor.as_str())
		.record(duration_secs);
}

pub fn record_health_check_failure(processor: ProcessorName) {
	counter!(
		names::HEALTH_CHECK_FAILURES_TOTAL,
		"processor" => processor.as_str()
	)
	.increment(1);
}

/// Counts one in-flight HTTP request for as long as it is held.
pub struct ActiveConnection;

impl ActiveConnection {
	pub fn open() -> Self {
		gauge!(names::ACTIVE_CONNECTIONS).increment(1.0);
		Self
	}
}

impl Drop for ActiveConnection {
	fn drop(&mut self) {
		gauge!(names::ACTIVE_CONNECTIONS).decrement(1.0);
	}
}

use async_trait::async_trait;
use derive_more::derive::{Display, Error};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::payment_processor::ProcessorEndpoint;

/// Body returned by a processor's health probe.
///
/// Processors answer either `{"status": "healthy"}` or
/// `{"failing": false, "minResponseTime": 12}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthReport {
	#[serde(default)]
	pub status:            Option<String>,
	#[serde(default)]
	pub failing:           Option<bool>,
	#[serde(rename = "minResponseTime", default)]
	pub min_response_time: Option<u64>,
}

impl HealthReport {
	pub fn is_healthy(&self) -> bool {
		match (&self.status, self.failing) {
			(Some(status), _) => status.eq_ignore_ascii_case("healthy"),
			(None, Some(failing)) => !failing,
			(None, None) => false,
		}
	}

	pub fn describe(&self) -> String {
		match (&self.status, self.failing) {
			(Some(status), _) => format!("status {status}"),
			(None, Some(true)) => "failing".to_string(),
			(None, Some(false)) => "not failing".to_string(),
			(None, None) => "no status".to_string(),
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessorPayment {
	#[serde(rename = "correlationId")]
	pub correlation_id: Uuid,
	#[serde(with = "rust_decimal::serde::float")]
	pub amount:         Decimal,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description:    Option<String>,
	#[serde(rename = "requestedAt", with = "time::serde::rfc3339")]
	pub requested_at:   OffsetDateTime,
}

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum ProcessorCallError {
	#[display("HTTP {code}")]
	Status { code: u16 },
	#[display("request timed out")]
	Timeout,
	#[display("{message}")]
	Transport { message: String },
	#[display("invalid response body: {message}")]
	InvalidBody { message: String },
}

#[async_trait]
pub trait PaymentProcessorClient: Send + Sync + 'static {
	async fn probe_health(
		&self,
		endpoint: &ProcessorEndpoint,
	) -> Result<HealthReport, ProcessorCallError>;

	/// Succeeds only on a 2xx answer from the processor.
	async fn submit_payment(
		&self,
		endpoint: &ProcessorEndpoint,
		payment: &ProcessorPayment,
	) -> Result<(), ProcessorCallError>;
}

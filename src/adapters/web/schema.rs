use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::payment::{self, PaymentRecord, PaymentStatus};
use crate::domain::payment_processor::ProcessorName;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentRequest {
	#[serde(with = "rust_decimal::serde::float")]
	pub amount:      Decimal,
	#[serde(default)]
	pub description: Option<String>,
}

impl From<PaymentRequest> for payment::PaymentRequest {
	fn from(request: PaymentRequest) -> Self {
		Self {
			amount:      request.amount,
			description: request.description,
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentResponse {
	pub id:        Uuid,
	#[serde(with = "rust_decimal::serde::float")]
	pub amount:    Decimal,
	pub status:    PaymentStatus,
	pub processor: ProcessorName,
	pub timestamp: f64,
}

impl From<PaymentRecord> for PaymentResponse {
	fn from(record: PaymentRecord) -> Self {
		Self {
			id:        record.id,
			amount:    record.amount,
			status:    record.status,
			processor: record.processor,
			timestamp: unix_seconds(record.created_at),
		}
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
	pub status:    String,
	pub timestamp: f64,
}

pub fn unix_seconds(at: OffsetDateTime) -> f64 {
	at.unix_timestamp() as f64 + f64::from(at.nanosecond()) / 1_000_000_000.0
}

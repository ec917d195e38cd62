use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::payment_processor::ProcessorName;

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
	pub amount:      Decimal,
	pub description: Option<String>,
}

impl PaymentRequest {
	pub fn has_valid_amount(&self) -> bool {
		self.amount > Decimal::ZERO
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
	Processed,
	Failed,
}

impl PaymentStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			PaymentStatus::Processed => "processed",
			PaymentStatus::Failed => "failed",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"processed" => Some(PaymentStatus::Processed),
			"failed" => Some(PaymentStatus::Failed),
			_ => None,
		}
	}
}

/// A completed payment. Built once by the payment use case and never
/// modified afterwards.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentRecord {
	pub id:          Uuid,
	#[serde(with = "rust_decimal::serde::float")]
	pub amount:      Decimal,
	pub status:      PaymentStatus,
	pub processor:   ProcessorName,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at:  OffsetDateTime,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub description: Option<String>,
}

impl PaymentRecord {
	pub fn processed(
		id: Uuid,
		request: &PaymentRequest,
		processor: ProcessorName,
	) -> Self {
		Self {
			id,
			amount: request.amount,
			status: PaymentStatus::Processed,
			processor,
			created_at: OffsetDateTime::now_utc(),
			description: request.description.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use rust_decimal_macros::dec;

	use super::*;

	#[test]
	fn test_rejects_non_positive_amounts() {
		let request = |amount| PaymentRequest {
			amount,
			description: None,
		};

		assert!(request(dec!(0.01)).has_valid_amount());
		assert!(!request(dec!(0)).has_valid_amount());
		assert!(!request(dec!(-1)).has_valid_amount());
	}

	#[test]
	fn test_processed_record_copies_request() {
		let id = Uuid::now_v7();
		let request = PaymentRequest {
			amount:      dec!(100.00),
			description: Some("order #42".to_string()),
		};

		let record =
			PaymentRecord::processed(id, &request, ProcessorName::Secondary);

		assert_eq!(record.id, id);
		assert_eq!(record.amount, dec!(100.00));
		assert_eq!(record.status, PaymentStatus::Processed);
		assert_eq!(record.processor, ProcessorName::Secondary);
		assert_eq!(record.description.as_deref(), Some("order #42"));
	}

	#[test]
	fn test_record_serializes_lowercase_tags() {
		let request = PaymentRequest {
			amount:      dec!(19.90),
			description: None,
		};
		let record =
			PaymentRecord::processed(Uuid::now_v7(), &request, ProcessorName::Primary);

		let json = serde_json::to_value(&record).unwrap();

		assert_eq!(json["status"], "processed");
		assert_eq!(json["processor"], "primary");
		assert_eq!(json["amount"], 19.9);
		assert!(json.get("description").is_none());
	}
}

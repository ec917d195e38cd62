use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProcessorSummary {
	pub count:        i64,
	#[serde(with = "rust_decimal::serde::float")]
	pub total_amount: Decimal,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentsSummaryResult {
	pub total_payments:        i64,
	#[serde(with = "rust_decimal::serde::float")]
	pub total_amount:          Decimal,
	pub payments_by_processor: BTreeMap<String, ProcessorSummary>,
}

use async_trait::async_trait;
use derive_more::derive::{Display, Error};
use rust_decimal::Decimal;

use crate::domain::payment::PaymentRecord;

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum StoreError {
	#[display("database error: {message}")]
	Database { message: String },
	#[display("cache error: {message}")]
	Cache { message: String },
	#[display("serialization error: {message}")]
	Serialization { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorTotals {
	pub processor:    String,
	pub count:        i64,
	pub total_amount: Decimal,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
	/// Inserts the record, replacing any row with the same id.
	async fn save(&self, record: &PaymentRecord) -> Result<(), StoreError>;
	async fn summarize_by_processor(
		&self,
	) -> Result<Vec<ProcessorTotals>, StoreError>;
}

#[async_trait]
pub trait PaymentCache: Send + Sync + 'static {
	async fn put(&self, record: &PaymentRecord) -> Result<(), StoreError>;
}

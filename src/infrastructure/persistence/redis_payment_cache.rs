use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::domain::payment::PaymentRecord;
use crate::domain::repository::{PaymentCache, StoreError};
use crate::infrastructure::config::redis::PAYMENTS_CACHE_KEY;

fn cache_error(e: redis::RedisError) -> StoreError {
	StoreError::Cache {
		message: e.to_string(),
	}
}

/// Audit copy of every processed payment, one hash field per payment id.
#[derive(Clone)]
pub struct RedisPaymentCache {
	client: Client,
}

impl RedisPaymentCache {
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	pub async fn get(&self, id: Uuid) -> Result<Option<PaymentRecord>, StoreError> {
		let mut con = self
			.client
			.get_multiplexed_async_connection()
			.await
			.map_err(cache_error)?;

		let payload: Option<String> = con
			.hget(PAYMENTS_CACHE_KEY, id.to_string())
			.await
			.map_err(cache_error)?;

		payload
			.map(|json| {
				serde_json::from_str(&json).map_err(|e| StoreError::Serialization {
					message: e.to_string(),
				})
			})
			.transpose()
	}
}

#[async_trait]
impl PaymentCache for RedisPaymentCache {
	async fn put(&self, record: &PaymentRecord) -> Result<(), StoreError> {
		let payload =
			serde_json::to_string(record).map_err(|e| StoreError::Serialization {
				message: e.to_string(),
			})?;

		let mut con = self
			.client
			.get_multiplexed_async_connection()
			.await
			.map_err(cache_error)?;

		let _: () = con
			.hset(PAYMENTS_CACHE_KEY, record.id.to_string(), payload)
			.await
			.map_err(cache_error)?;

		Ok(())
	}
}

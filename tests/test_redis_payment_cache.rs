use payment_router::domain::payment::{PaymentRecord, PaymentRequest};
use payment_router::domain::payment_processor::ProcessorName;
use payment_router::domain::repository::PaymentCache;
use payment_router::infrastructure::config::redis::PAYMENTS_CACHE_KEY;
use payment_router::infrastructure::persistence::redis_payment_cache::RedisPaymentCache;
use redis::AsyncCommands;
use rust_decimal_macros::dec;
use uuid::Uuid;

mod support;

use crate::support::redis_container::get_test_redis_client;

fn record(processor: ProcessorName) -> PaymentRecord {
	PaymentRecord::processed(
		Uuid::now_v7(),
		&PaymentRequest {
			amount:      dec!(250.75),
			description: Some("subscription".to_string()),
		},
		processor,
	)
}

#[tokio::test]
async fn test_put_then_get_returns_record() {
	let redis_container = get_test_redis_client().await;
	let cache = RedisPaymentCache::new(redis_container.client().clone());
	let record = record(ProcessorName::Secondary);

	cache.put(&record).await.unwrap();
	let cached = cache.get(record.id).await.unwrap().unwrap();

	assert_eq!(cached.id, record.id);
	assert_eq!(cached.amount, record.amount);
	assert_eq!(cached.processor, ProcessorName::Secondary);
	assert_eq!(cached.description.as_deref(), Some("subscription"));
}

#[tokio::test]
async fn test_records_share_one_hash_without_expiry() {
	let redis_container = get_test_redis_client().await;
	let cache = RedisPaymentCache::new(redis_container.client().clone());

	cache.put(&record(ProcessorName::Primary)).await.unwrap();
	cache.put(&record(ProcessorName::Primary)).await.unwrap();

	let mut con = redis_container
		.client()
		.get_multiplexed_async_connection()
		.await
		.unwrap();
	let fields: usize = con.hlen(PAYMENTS_CACHE_KEY).await.unwrap();
	let ttl: i64 = con.ttl(PAYMENTS_CACHE_KEY).await.unwrap();

	assert_eq!(fields, 2);
	assert_eq!(ttl, -1);
}

#[tokio::test]
async fn test_get_unknown_id_is_none() {
	let redis_container = get_test_redis_client().await;
	let cache = RedisPaymentCache::new(redis_container.client().clone());

	assert!(cache.get(Uuid::now_v7()).await.unwrap().is_none());
}

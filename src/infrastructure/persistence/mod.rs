pub mod postgres_payment_repository;
pub mod redis_payment_cache;

pub mod circuit_breaker;
pub mod health_monitor;
pub mod health_status;
pub mod payment;
pub mod payment_processor;
pub mod processor_client;
pub mod repository;

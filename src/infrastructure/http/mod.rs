pub mod client_pool;
pub mod http_processor_client;

pub mod config;
pub mod http;
pub mod metrics;
pub mod persistence;
pub mod routing;
pub mod workers;

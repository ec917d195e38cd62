use serde::Deserialize;

use crate::domain::payment_processor::{
	ProcessorEndpoint, ProcessorEndpoints, ProcessorName,
};

fn default_server_port() -> u16 {
	9999
}

fn default_server_keepalive() -> u64 {
	30
}

fn default_database_max_connections() -> u32 {
	20
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub redis_url:                     String,
	pub database_url:                  String,
	pub primary_processor_url:         String,
	pub secondary_processor_url:       String,
	#[serde(default)]
	pub primary_processor_simulated:   bool,
	#[serde(default)]
	pub secondary_processor_simulated: bool,
	#[serde(default = "default_server_port")]
	pub server_port:                   u16,
	#[serde(default = "default_server_keepalive")]
	pub server_keepalive:              u64,
	#[serde(default = "default_database_max_connections")]
	pub database_max_connections:      u32,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}

	pub fn processor_endpoints(&self) -> ProcessorEndpoints {
		ProcessorEndpoints::new(
			ProcessorEndpoint {
				simulated: self.primary_processor_simulated,
				..ProcessorEndpoint::new(
					ProcessorName::Primary,
					&self.primary_processor_url,
				)
			},
			ProcessorEndpoint {
				simulated: self.secondary_processor_simulated,
				..ProcessorEndpoint::new(
					ProcessorName::Secondary,
					&self.secondary_processor_url,
				)
			},
		)
	}
}

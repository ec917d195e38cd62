use actix_web::{ResponseError, web};
use log::warn;

use crate::adapters::web::errors::ApiError;

pub mod errors;
pub mod health_handler;
pub mod metrics_handler;
pub mod payments_handler;
pub mod payments_summary_handler;
pub mod schema;

pub fn routes(cfg: &mut web::ServiceConfig) {
	cfg.app_data(json_config())
		.service(payments_handler::payments)
		.service(payments_summary_handler::payments_summary)
		.service(health_handler::health)
		.service(metrics_handler::metrics);
}

/// Malformed bodies get the same JSON error shape as every other failure.
pub fn json_config() -> web::JsonConfig {
	web::JsonConfig::default().error_handler(|err, _req| {
		warn!("Rejected payment body: {err}");
		let response = ApiError::BadClientDataError.error_response();
		actix_web::error::InternalError::from_response(err, response).into()
	})
}

use actix_web::{HttpResponse, Responder, get};
use time::OffsetDateTime;

use crate::adapters::web::schema::{HealthResponse, unix_seconds};

#[get("/health")]
pub async fn health() -> impl Responder {
	HttpResponse::Ok().json(HealthResponse {
		status:    "healthy".to_string(),
		timestamp: unix_seconds(OffsetDateTime::now_utc()),
	})
}

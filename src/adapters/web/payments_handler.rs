use actix_web::{HttpResponse, Responder, ResponseError, post, web};
use log::warn;

use crate::PaymentGateway;
use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{PaymentRequest, PaymentResponse};

#[post("/payments")]
pub async fn payments(
	payload: web::Json<PaymentRequest>,
	payment_gateway: web::Data<PaymentGateway>,
) -> impl Responder {
	match payment_gateway.execute(payload.into_inner().into()).await {
		Ok(record) => HttpResponse::Ok().json(PaymentResponse::from(record)),
		Err(e) => {
			warn!("Payment rejected: {e}");
			ApiError::from(e).error_response()
		}
	}
}

use actix_web::{HttpResponse, Responder, ResponseError, get, web};
use log::error;

use crate::PaymentSummary;
use crate::adapters::web::errors::ApiError;

#[get("/payments-summary")]
pub async fn payments_summary(
	get_payment_summary_use_case: web::Data<PaymentSummary>,
) -> impl Responder {
	match get_payment_summary_use_case.execute().await {
		Ok(summary) => HttpResponse::Ok().json(summary),
		Err(e) => {
			error!("Error getting payment summary: {e}");
			ApiError::from(e).error_response()
		}
	}
}

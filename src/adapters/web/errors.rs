use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

use crate::domain::repository::StoreError;
use crate::use_cases::process_payment::ProcessingError;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum ApiError {
	#[display("Request data is invalid.")]
	BadClientDataError,
	#[display("Payment could not be processed.")]
	ProcessingError,
	#[display("Internal server error.")]
	InternalServerError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::BadClientDataError => "Bad request".to_string(),
			ApiError::ProcessingError => "Processing Error".to_string(),
			ApiError::InternalServerError => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::BadClientDataError => StatusCode::BAD_REQUEST,
			ApiError::ProcessingError => StatusCode::INTERNAL_SERVER_ERROR,
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<ProcessingError> for ApiError {
	fn from(e: ProcessingError) -> Self {
		match e {
			ProcessingError::InvalidAmount => ApiError::BadClientDataError,
			ProcessingError::AllProcessorsFailed => ApiError::ProcessingError,
		}
	}
}

impl From<StoreError> for ApiError {
	fn from(_: StoreError) -> Self {
		ApiError::InternalServerError
	}
}

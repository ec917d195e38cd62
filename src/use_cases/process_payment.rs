use std::time::Duration;

use derive_more::derive::{Display, Error};
use log::{error, info, warn};
use time::OffsetDateTime;
use tokio::time::{Instant, sleep, timeout};
use uuid::Uuid;

use crate::domain::circuit_breaker::CircuitBreaker;
use crate::domain::health_monitor::HealthMonitor;
use crate::domain::payment::{PaymentRecord, PaymentRequest, PaymentStatus};
use crate::domain::payment_processor::ProcessorEndpoint;
use crate::domain::processor_client::{
	PaymentProcessorClient, ProcessorCallError, ProcessorPayment,
};
use crate::infrastructure::metrics;
use crate::use_cases::record_payment::AuditRecorder;
use crate::use_cases::select_processor::ProcessorSelector;

pub const PAYMENT_TIMEOUT: Duration = Duration::from_secs(10);
pub const SIMULATED_PROCESSING_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum ProcessingError {
	#[display("Payment amount must be greater than zero.")]
	InvalidAmount,
	#[display("Payment could not be processed by any processor.")]
	AllProcessorsFailed,
}

/// Routes one payment: select, attempt, fail over at most once, record.
#[derive(Clone)]
pub struct ProcessPaymentUseCase<H, B, C>
where
	H: HealthMonitor,
	B: CircuitBreaker,
	C: PaymentProcessorClient,
{
	selector:         ProcessorSelector<H>,
	circuit_breaker:  B,
	processor_client: C,
	audit_recorder:   AuditRecorder,
}

impl<H, B, C> ProcessPaymentUseCase<H, B, C>
where
	H: HealthMonitor,
	B: CircuitBreaker,
	C: PaymentProcessorClient,
{
	pub fn new(
		selector: ProcessorSelector<H>,
		circuit_breaker: B,
		processor_client: C,
		audit_recorder: AuditRecorder,
	) -> Self {
		Self {
			selector,
			circuit_breaker,
			processor_client,
			audit_recorder,
		}
	}

	pub async fn execute(
		&self,
		request: PaymentRequest,
	) -> Result<PaymentRecord, ProcessingError> {
		if !request.has_valid_amount() {
			return Err(ProcessingError::InvalidAmount);
		}

		let started_at = Instant::now();
		let payment_id = Uuid::now_v7();

		let selection = self.selector.select().await;
		let preferred = selection.endpoint;
		let alternate = self.selector.endpoints().alternate_of(preferred.name);

		if self.circuit_breaker.is_open(&preferred).await {
			warn!(
				"Circuit open for {} processor, sending payment {payment_id} to {}",
				preferred.name, alternate.name
			);
		} else {
			match self.attempt(&preferred, payment_id, &request).await {
				Ok(()) => {
					return Ok(self
						.complete(payment_id, &request, &preferred, started_at)
						.await);
				}
				Err(e) => {
					self.circuit_breaker.record_failure(&preferred).await;
					warn!(
						"{} processor failed payment {payment_id}: {e}. Failing over \
						 to {}",
						preferred.name, alternate.name
					);
				}
			}
		}

		match self.attempt(alternate, payment_id, &request).await {
			Ok(()) => Ok(self
				.complete(payment_id, &request, alternate, started_at)
				.await),
			Err(e) => {
				self.circuit_breaker.record_failure(alternate).await;
				error!(
					"Payment {payment_id} could not be processed by any processor. \
					 Last error from {}: {e}",
					alternate.name
				);
				metrics::record_payment_request(alternate.name, PaymentStatus::Failed);
				Err(ProcessingError::AllProcessorsFailed)
			}
		}
	}

	async fn attempt(
		&self,
		endpoint: &ProcessorEndpoint,
		payment_id: Uuid,
		request: &PaymentRequest,
	) -> Result<(), ProcessorCallError> {
		if endpoint.simulated {
			sleep(SIMULATED_PROCESSING_DELAY).await;
			return Ok(());
		}

		let payment = ProcessorPayment {
			correlation_id: payment_id,
			amount:         request.amount,
			description:    request.description.clone(),
			requested_at:   OffsetDateTime::now_utc(),
		};

		timeout(
			PAYMENT_TIMEOUT,
			self.processor_client.submit_payment(endpoint, &payment),
		)
		.await
		.unwrap_or(Err(ProcessorCallError::Timeout))
	}

	async fn complete(
		&self,
		payment_id: Uuid,
		request: &PaymentRequest,
		endpoint: &ProcessorEndpoint,
		started_at: Instant,
	) -> PaymentRecord {
		self.circuit_breaker.record_success(endpoint).await;

		let record = PaymentRecord::processed(payment_id, request, endpoint.name);
		info!(
			"Payment {payment_id} processed by {} processor",
			endpoint.name
		);
		metrics::record_payment_request(endpoint.name, record.status);
		metrics::record_payment_duration(
			endpoint.name,
			started_at.elapsed().as_secs_f64(),
		);

		self.audit_recorder.submit(record.clone());
		record
	}
}

use async_trait::async_trait;

use crate::domain::payment_processor::ProcessorEndpoint;
use crate::domain::processor_client::{
	HealthReport, PaymentProcessorClient, ProcessorCallError, ProcessorPayment,
};
use crate::infrastructure::http::client_pool::ClientPool;

pub const HEALTH_PROBE_PATH: &str = "/payments/service-health";
pub const PAYMENTS_PATH: &str = "/payments";

impl From<reqwest::Error> for ProcessorCallError {
	fn from(e: reqwest::Error) -> Self {
		if e.is_timeout() {
			ProcessorCallError::Timeout
		} else {
			ProcessorCallError::Transport {
				message: e.to_string(),
			}
		}
	}
}

#[derive(Clone)]
pub struct HttpProcessorClient {
	pool: ClientPool,
}

impl HttpProcessorClient {
	pub fn new(pool: ClientPool) -> Self {
		Self { pool }
	}

	pub fn pool(&self) -> &ClientPool {
		&self.pool
	}
}

#[async_trait]
impl PaymentProcessorClient for HttpProcessorClient {
	async fn probe_health(
		&self,
		endpoint: &ProcessorEndpoint,
	) -> Result<HealthReport, ProcessorCallError> {
		let pooled = self.pool.get(&endpoint.url)?;
		let _permit =
			pooled
				.permits
				.acquire()
				.await
				.map_err(|e| ProcessorCallError::Transport {
					message: e.to_string(),
				})?;

		let resp = pooled
			.client
			.get(format!("{}{HEALTH_PROBE_PATH}", endpoint.url))
			.send()
			.await?;

		if !resp.status().is_success() {
			return Err(ProcessorCallError::Status {
				code: resp.status().as_u16(),
			});
		}

		resp.json::<HealthReport>()
			.await
			.map_err(|e| ProcessorCallError::InvalidBody {
				message: e.to_string(),
			})
	}

	async fn submit_payment(
		&self,
		endpoint: &ProcessorEndpoint,
		payment: &ProcessorPayment,
	) -> Result<(), ProcessorCallError> {
		let pooled = self.pool.get(&endpoint.url)?;
		let _permit =
			pooled
				.permits
				.acquire()
				.await
				.map_err(|e| ProcessorCallError::Transport {
					message: e.to_string(),
				})?;

		let resp = pooled
			.client
			.post(format!("{}{PAYMENTS_PATH}", endpoint.url))
			.json(payment)
			.send()
			.await?;

		if resp.status().is_success() {
			Ok(())
		} else {
			Err(ProcessorCallError::Status {
				code: resp.status().as_u16(),
			})
		}
	}
}

use log::{debug, error};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::payment::PaymentRecord;
use crate::domain::repository::{PaymentCache, PaymentRepository};

/// Writes a completed payment to the durable store, then to the audit cache.
///
/// Failures are logged and dropped: by the time a record gets here the
/// caller already has its answer.
#[derive(Clone)]
pub struct RecordPaymentUseCase<R: PaymentRepository, C: PaymentCache> {
	payment_repo:  R,
	payment_cache: C,
}

impl<R: PaymentRepository, C: PaymentCache> RecordPaymentUseCase<R, C> {
	pub fn new(payment_repo: R, payment_cache: C) -> Self {
		Self {
			payment_repo,
			payment_cache,
		}
	}

	pub async fn execute(&self, record: &PaymentRecord) {
		if let Err(e) = self.payment_repo.save(record).await {
			error!("Failed to persist payment {}: {e}", record.id);
		}

		if let Err(e) = self.payment_cache.put(record).await {
			error!("Failed to cache payment {}: {e}", record.id);
		}

		debug!("Payment {} recorded", record.id);
	}
}

/// Payments waiting for storage before new ones are dropped.
pub const AUDIT_QUEUE_CAPACITY: usize = 10_000;

/// Hands completed payments to the audit worker without waiting on storage.
///
/// When storage falls behind and the queue is full, the record is logged
/// and dropped rather than holding up the response.
#[derive(Clone)]
pub struct AuditRecorder {
	sender: mpsc::Sender<PaymentRecord>,
}

impl AuditRecorder {
	pub fn channel() -> (Self, mpsc::Receiver<PaymentRecord>) {
		Self::with_capacity(AUDIT_QUEUE_CAPACITY)
	}

	pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<PaymentRecord>) {
		let (sender, receiver) = mpsc::channel(capacity);
		(Self { sender }, receiver)
	}

	pub fn submit(&self, record: PaymentRecord) {
		match self.sender.try_send(record) {
			Ok(()) => {}
			Err(TrySendError::Full(record)) => {
				error!(
					"Audit queue full, payment will not be recorded: {}",
					serde_json::to_string(&record)
						.unwrap_or_else(|_| record.id.to_string())
				);
			}
			Err(TrySendError::Closed(record)) => {
				error!(
					"Audit worker is gone, payment {} will not be recorded",
					record.id
				);
			}
		}
	}
}

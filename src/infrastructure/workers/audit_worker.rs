use futures::future::join_all;
use log::{debug, info};
use tokio::sync::mpsc::Receiver;

use crate::domain::payment::PaymentRecord;
use crate::domain::repository::{PaymentCache, PaymentRepository};
use crate::use_cases::record_payment::RecordPaymentUseCase;

pub const AUDIT_BATCH_SIZE: usize = 64;

/// Drains completed payments into storage until every sender is dropped.
///
/// Records already queued when the channel closes are still written.
pub async fn audit_worker<R, C>(
	mut receiver: Receiver<PaymentRecord>,
	record_payment_use_case: RecordPaymentUseCase<R, C>,
) where
	R: PaymentRepository,
	C: PaymentCache,
{
	let mut batch = Vec::with_capacity(AUDIT_BATCH_SIZE);

	loop {
		if receiver.recv_many(&mut batch, AUDIT_BATCH_SIZE).await == 0 {
			break;
		}

		debug!("Recording batch of {} payments", batch.len());
		join_all(
			batch
				.iter()
				.map(|record| record_payment_use_case.execute(record)),
		)
		.await;
		batch.clear();
	}

	info!("Audit channel closed, worker stopped.");
}

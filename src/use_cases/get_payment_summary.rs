use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::repository::{PaymentRepository, StoreError};
use crate::use_cases::dto::{PaymentsSummaryResult, ProcessorSummary};

#[derive(Clone)]
pub struct GetPaymentSummaryUseCase<R: PaymentRepository> {
	payment_repo: R,
}

impl<R: PaymentRepository> GetPaymentSummaryUseCase<R> {
	pub fn new(payment_repo: R) -> Self {
		Self { payment_repo }
	}

	pub async fn execute(&self) -> Result<PaymentsSummaryResult, StoreError> {
		let totals = self.payment_repo.summarize_by_processor().await?;

		let mut summary = PaymentsSummaryResult {
			total_payments:        0,
			total_amount:          Decimal::ZERO,
			payments_by_processor: BTreeMap::new(),
		};

		for row in totals {
			summary.total_payments += row.count;
			summary.total_amount += row.total_amount;
			summary
				.payments_by_processor
				.insert(row.processor, ProcessorSummary {
					count:        row.count,
					total_amount: row.total_amount,
				});
		}

		Ok(summary)
	}
}

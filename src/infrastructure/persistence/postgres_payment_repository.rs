use std::time::Duration;

use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use uuid::Uuid;

use crate::domain::payment::{PaymentRecord, PaymentStatus};
use crate::domain::payment_processor::ProcessorName;
use crate::domain::repository::{PaymentRepository, ProcessorTotals, StoreError};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_PAYMENTS_TABLE: &str = r#"
	CREATE TABLE IF NOT EXISTS payments (
		id          UUID PRIMARY KEY,
		amount      NUMERIC NOT NULL,
		status      TEXT NOT NULL,
		processor   TEXT NOT NULL,
		created_at  TIMESTAMPTZ NOT NULL,
		description TEXT
	)
"#;

fn database_error(e: sqlx::Error) -> StoreError {
	StoreError::Database {
		message: e.to_string(),
	}
}

#[derive(Clone)]
pub struct PostgresPaymentRepository {
	pool: PgPool,
}

impl PostgresPaymentRepository {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}

	pub async fn connect(
		database_url: &str,
		max_connections: u32,
	) -> Result<Self, StoreError> {
		let pool = PgPoolOptions::new()
			.max_connections(max_connections)
			.acquire_timeout(ACQUIRE_TIMEOUT)
			.connect(database_url)
			.await
			.map_err(database_error)?;

		Ok(Self::new(pool))
	}

	/// Creates the `payments` table when it does not exist yet.
	pub async fn migrate(&self) -> Result<(), StoreError> {
		sqlx::query(CREATE_PAYMENTS_TABLE)
			.execute(&self.pool)
			.await
			.map_err(database_error)?;
		info!("Payments table is ready");
		Ok(())
	}

	pub async fn find_by_id(
		&self,
		id: Uuid,
	) -> Result<Option<PaymentRecord>, StoreError> {
		let row = sqlx::query(
			r#"SELECT id, amount, status, processor, created_at, description
			   FROM payments WHERE id = $1"#,
		)
		.bind(id)
		.fetch_optional(&self.pool)
		.await
		.map_err(database_error)?;

		row.map(|row| record_from_row(&row)).transpose()
	}

	pub async fn close(&self) {
		self.pool.close().await;
	}
}

fn record_from_row(row: &PgRow) -> Result<PaymentRecord, StoreError> {
	let status: String = row.try_get("status").map_err(database_error)?;
	let processor: String = row.try_get("processor").map_err(database_error)?;

	Ok(PaymentRecord {
		id:          row.try_get("id").map_err(database_error)?,
		amount:      row.try_get("amount").map_err(database_error)?,
		status:      PaymentStatus::parse(&status).ok_or_else(|| {
			StoreError::Serialization {
				message: format!("unknown payment status '{status}'"),
			}
		})?,
		processor:   ProcessorName::parse(&processor).ok_or_else(|| {
			StoreError::Serialization {
				message: format!("unknown processor '{processor}'"),
			}
		})?,
		created_at:  row.try_get("created_at").map_err(database_error)?,
		description: row.try_get("description").map_err(database_error)?,
	})
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
	async fn save(&self, record: &PaymentRecord) -> Result<(), StoreError> {
		sqlx::query(
			r#"INSERT INTO payments (id, amount, status, processor, created_at, description)
			   VALUES ($1, $2, $3, $4, $5, $6)
			   ON CONFLICT (id) DO UPDATE SET
			       amount = EXCLUDED.amount,
			       status = EXCLUDED.status,
			       processor = EXCLUDED.processor,
			       created_at = EXCLUDED.created_at,
			       description = EXCLUDED.description"#,
		)
		.bind(record.id)
		.bind(record.amount)
		.bind(record.status.as_str())
		.bind(record.processor.as_str())
		.bind(record.created_at)
		.bind(record.description.as_deref())
		.execute(&self.pool)
		.await
		.map_err(database_error)?;

		Ok(())
	}

	async fn summarize_by_processor(
		&self,
	) -> Result<Vec<ProcessorTotals>, StoreError> {
		let rows = sqlx::query(
			r#"SELECT processor, COUNT(*) AS count, SUM(amount) AS total_amount
			   FROM payments
			   WHERE status = $1
			   GROUP BY processor
			   ORDER BY processor"#,
		)
		.bind(PaymentStatus::Processed.as_str())
		.fetch_all(&self.pool)
		.await
		.map_err(database_error)?;

		rows.iter()
			.map(|row| {
				let total_amount: Option<Decimal> =
					row.try_get("total_amount").map_err(database_error)?;
				Ok(ProcessorTotals {
					processor:    row.try_get("processor").map_err(database_error)?,
					count:        row.try_get("count").map_err(database_error)?,
					total_amount: total_amount.unwrap_or_default(),
				})
			})
			.collect()
	}
}

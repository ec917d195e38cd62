use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::Service;
use actix_web::{App, HttpServer, web};
use log::{error, info, warn};
use tokio::time::timeout;

use crate::domain::payment_processor::ProcessorEndpoints;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::http::client_pool::ClientPool;
use crate::infrastructure::http::http_processor_client::HttpProcessorClient;
use crate::infrastructure::metrics;
use crate::infrastructure::persistence::postgres_payment_repository::PostgresPaymentRepository;
use crate::infrastructure::persistence::redis_payment_cache::RedisPaymentCache;
use crate::infrastructure::routing::in_memory_circuit_breaker::InMemoryCircuitBreaker;
use crate::infrastructure::routing::in_memory_health_monitor::InMemoryHealthMonitor;
use crate::infrastructure::workers::audit_worker::audit_worker;
use crate::use_cases::get_payment_summary::GetPaymentSummaryUseCase;
use crate::use_cases::process_payment::ProcessPaymentUseCase;
use crate::use_cases::record_payment::{AuditRecorder, RecordPaymentUseCase};
use crate::use_cases::select_processor::ProcessorSelector;

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

/// How long shutdown waits for queued payments to reach storage.
pub const AUDIT_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

pub type PaymentGateway = ProcessPaymentUseCase<
	InMemoryHealthMonitor<HttpProcessorClient>,
	InMemoryCircuitBreaker,
	HttpProcessorClient,
>;

pub type PaymentSummary = GetPaymentSummaryUseCase<PostgresPaymentRepository>;

pub fn payment_gateway(
	endpoints: ProcessorEndpoints,
	processor_client: HttpProcessorClient,
	audit_recorder: AuditRecorder,
) -> PaymentGateway {
	ProcessPaymentUseCase::new(
		ProcessorSelector::new(
			InMemoryHealthMonitor::new(processor_client.clone()),
			endpoints,
		),
		InMemoryCircuitBreaker::default(),
		processor_client,
		audit_recorder,
	)
}

fn startup_error(what: &str, e: impl std::fmt::Display) -> io::Error {
	io::Error::other(format!("{what}: {e}"))
}

pub async fn run(config: Arc<Config>) -> io::Result<()> {
	let metrics_handle = metrics::install_recorder()
		.map_err(|e| startup_error("Failed to install metrics recorder", e))?;

	let payment_repo = PostgresPaymentRepository::connect(
		&config.database_url,
		config.database_max_connections,
	)
	.await
	.map_err(|e| startup_error("Failed to connect to the database", e))?;
	payment_repo
		.migrate()
		.await
		.map_err(|e| startup_error("Failed to prepare the payments table", e))?;

	let redis_client = redis::Client::open(config.redis_url.clone())
		.map_err(|e| startup_error("Invalid Redis URL", e))?;
	let payment_cache = RedisPaymentCache::new(redis_client);

	let client_pool = ClientPool::new();
	let processor_client = HttpProcessorClient::new(client_pool.clone());

	let (audit_recorder, audit_receiver) = AuditRecorder::channel();
	info!("Starting audit worker...");
	let audit_handle = tokio::spawn(audit_worker(
		audit_receiver,
		RecordPaymentUseCase::new(payment_repo.clone(), payment_cache),
	));

	let payment_gateway = payment_gateway(
		config.processor_endpoints(),
		processor_client,
		audit_recorder,
	);
	let payment_summary = GetPaymentSummaryUseCase::new(payment_repo.clone());

	info!("Starting Actix-Web server on 0.0.0.0:{}...", config.server_port);
	let served = HttpServer::new(move || {
		App::new()
			.wrap_fn(|req, srv| {
				let connection = metrics::ActiveConnection::open();
				let response = srv.call(req);
				async move {
					let response = response.await;
					drop(connection);
					response
				}
			})
			.app_data(web::Data::new(payment_gateway.clone()))
			.app_data(web::Data::new(payment_summary.clone()))
			.app_data(web::Data::new(metrics_handle.clone()))
			.configure(adapters::web::routes)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind(("0.0.0.0", config.server_port))?
	.run()
	.await;

	info!("Server stopped, draining audit queue...");
	match timeout(AUDIT_DRAIN_TIMEOUT, audit_handle).await {
		Ok(Ok(())) => info!("Audit queue drained"),
		Ok(Err(e)) => error!("Audit worker failed: {e}"),
		Err(_) => warn!("Audit queue not drained within {AUDIT_DRAIN_TIMEOUT:?}"),
	}

	client_pool.close();
	payment_repo.close().await;
	info!("Shutdown complete");

	served
}

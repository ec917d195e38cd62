use payment_router::domain::payment_processor::{ProcessorEndpoint, ProcessorName};
use payment_router::domain::processor_client::{
	PaymentProcessorClient, ProcessorCallError, ProcessorPayment,
};
use payment_router::infrastructure::http::client_pool::ClientPool;
use payment_router::infrastructure::http::http_processor_client::HttpProcessorClient;
use rust_decimal_macros::dec;
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> ProcessorEndpoint {
	ProcessorEndpoint::new(ProcessorName::Primary, server.uri())
}

#[tokio::test]
async fn test_probe_health_reads_report() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/payments/service-health"))
		.respond_with(
			ResponseTemplate::new(200)
				.set_body_json(json!({"failing": false, "minResponseTime": 7})),
		)
		.expect(1)
		.mount(&server)
		.await;

	let client = HttpProcessorClient::new(ClientPool::new());
	let report = client.probe_health(&endpoint(&server)).await.unwrap();

	assert!(report.is_healthy());
	assert_eq!(report.min_response_time, Some(7));
}

#[tokio::test]
async fn test_probe_health_non_success_is_status_error() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/payments/service-health"))
		.respond_with(ResponseTemplate::new(503))
		.mount(&server)
		.await;

	let client = HttpProcessorClient::new(ClientPool::new());
	let result = client.probe_health(&endpoint(&server)).await;

	assert_eq!(result.unwrap_err(), ProcessorCallError::Status { code: 503 });
}

#[tokio::test]
async fn test_probe_health_garbage_body_is_invalid() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/payments/service-health"))
		.respond_with(ResponseTemplate::new(200).set_body_string("not json"))
		.mount(&server)
		.await;

	let client = HttpProcessorClient::new(ClientPool::new());
	let result = client.probe_health(&endpoint(&server)).await;

	assert!(matches!(
		result,
		Err(ProcessorCallError::InvalidBody { .. })
	));
}

#[tokio::test]
async fn test_submit_payment_posts_json_body() {
	let server = MockServer::start().await;
	let correlation_id = Uuid::now_v7();
	Mock::given(method("POST"))
		.and(path("/payments"))
		.and(body_partial_json(json!({
			"correlationId": correlation_id,
			"amount": 19.9,
			"description": "coffee",
		})))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = HttpProcessorClient::new(ClientPool::new());
	let payment = ProcessorPayment {
		correlation_id,
		amount: dec!(19.90),
		description: Some("coffee".to_string()),
		requested_at: OffsetDateTime::now_utc(),
	};

	client
		.submit_payment(&endpoint(&server), &payment)
		.await
		.unwrap();
}

#[tokio::test]
async fn test_submit_payment_rejection_is_status_error() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/payments"))
		.respond_with(ResponseTemplate::new(422))
		.mount(&server)
		.await;

	let client = HttpProcessorClient::new(ClientPool::new());
	let payment = ProcessorPayment {
		correlation_id: Uuid::now_v7(),
		amount:         dec!(1),
		description:    None,
		requested_at:   OffsetDateTime::now_utc(),
	};

	let result = client.submit_payment(&endpoint(&server), &payment).await;

	assert_eq!(result.unwrap_err(), ProcessorCallError::Status { code: 422 });
}

#[tokio::test]
async fn test_unreachable_processor_is_transport_error() {
	let client = HttpProcessorClient::new(ClientPool::new());
	let endpoint = ProcessorEndpoint::new(ProcessorName::Secondary, "http://127.0.0.1:1");

	let result = client.probe_health(&endpoint).await;

	assert!(matches!(result, Err(ProcessorCallError::Transport { .. })));
}

#[tokio::test]
async fn test_closed_pool_refuses_new_endpoints() {
	let server = MockServer::start().await;
	let pool = ClientPool::new();
	let client = HttpProcessorClient::new(pool.clone());

	pool.close();
	let result = client.probe_health(&endpoint(&server)).await;

	assert!(matches!(result, Err(ProcessorCallError::Transport { .. })));
}

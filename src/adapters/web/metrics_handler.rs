use actix_web::{HttpResponse, Responder, get, web};
use metrics_exporter_prometheus::PrometheusHandle;

#[get("/metrics")]
pub async fn metrics(handle: web::Data<PrometheusHandle>) -> impl Responder {
	HttpResponse::Ok()
		.content_type("text/plain; version=0.0.4")
		.body(handle.render())
}

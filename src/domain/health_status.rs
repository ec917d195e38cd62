use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
	Healthy,
	Unhealthy,
	Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthStatus {
	pub status:       HealthState,
	pub error_detail: Option<String>,
	pub observed_at:  OffsetDateTime,
}

impl HealthStatus {
	pub fn healthy() -> Self {
		Self {
			status:       HealthState::Healthy,
			error_detail: None,
			observed_at:  OffsetDateTime::now_utc(),
		}
	}

	pub fn unhealthy(error_detail: impl Into<String>) -> Self {
		Self {
			status:       HealthState::Unhealthy,
			error_detail: Some(error_detail.into()),
			observed_at:  OffsetDateTime::now_utc(),
		}
	}

	pub fn unknown() -> Self {
		Self {
			status:       HealthState::Unknown,
			error_detail: None,
			observed_at:  OffsetDateTime::now_utc(),
		}
	}

	pub fn is_healthy(&self) -> bool {
		matches!(self.status, HealthState::Healthy)
	}
}

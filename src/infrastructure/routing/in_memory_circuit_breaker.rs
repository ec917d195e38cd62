use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use tokio::time::Instant;

use crate::domain::circuit_breaker::CircuitBreaker;
use crate::domain::payment_processor::{ProcessorEndpoint, ProcessorName};

pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircuitState {
	pub consecutive_failures: u32,
	pub last_failure_at:      Option<Instant>,
}

/// Process-local circuit breaker.
///
/// A circuit opens once `failure_threshold` consecutive failures are
/// recorded and stays open until `cooldown` has elapsed since the last
/// failure. The reset back to closed happens on the next `is_open` check.
#[derive(Clone)]
pub struct InMemoryCircuitBreaker {
	circuits:          Arc<Mutex<HashMap<ProcessorName, CircuitState>>>,
	failure_threshold: u32,
	cooldown:          Duration,
}

impl InMemoryCircuitBreaker {
	pub fn new(failure_threshold: u32, cooldown: Duration) -> Self {
		Self {
			circuits: Arc::new(Mutex::new(HashMap::new())),
			failure_threshold,
			cooldown,
		}
	}

	pub fn state(&self, processor: ProcessorName) -> CircuitState {
		self.circuits().get(&processor).cloned().unwrap_or_default()
	}

	fn circuits(&self) -> MutexGuard<'_, HashMap<ProcessorName, CircuitState>> {
		self.circuits.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl Default for InMemoryCircuitBreaker {
	fn default() -> Self {
		Self::new(DEFAULT_FAILURE_THRESHOLD, DEFAULT_COOLDOWN)
	}
}

#[async_trait]
impl CircuitBreaker for InMemoryCircuitBreaker {
	async fn is_open(&self, endpoint: &ProcessorEndpoint) -> bool {
		let mut circuits = self.circuits();
		let Some(state) = circuits.get_mut(&endpoint.name) else {
			return false;
		};

		if state.consecutive_failures < self.failure_threshold {
			return false;
		}

		match state.last_failure_at {
			Some(failed_at) if failed_at.elapsed() <= self.cooldown => true,
			_ => {
				*state = CircuitState::default();
				info!("Circuit for {} processor closed after cooldown", endpoint.name);
				false
			}
		}
	}

	async fn record_failure(&self, endpoint: &ProcessorEndpoint) {
		let mut circuits = self.circuits();
		let state = circuits.entry(endpoint.name).or_default();
		state.consecutive_failures += 1;
		state.last_failure_at = Some(Instant::now());

		if state.consecutive_failures == self.failure_threshold {
			warn!(
				"Circuit for {} processor opened after {} consecutive failures",
				endpoint.name, state.consecutive_failures
			);
		}
	}

	async fn record_success(&self, endpoint: &ProcessorEndpoint) {
		if let Some(state) = self.circuits().get_mut(&endpoint.name) {
			state.consecutive_failures = 0;
		}
	}
}

#[cfg(test)]
mod tests {
	use tokio::time::advance;

	use super::*;

	fn primary() -> ProcessorEndpoint {
		ProcessorEndpoint::new(ProcessorName::Primary, "http://primary")
	}

	fn secondary() -> ProcessorEndpoint {
		ProcessorEndpoint::new(ProcessorName::Secondary, "http://secondary")
	}

	async fn fail_times(breaker: &InMemoryCircuitBreaker, times: u32) {
		for _ in 0..times {
			breaker.record_failure(&primary()).await;
		}
	}

	#[tokio::test]
	async fn test_unknown_circuit_is_closed() {
		let breaker = InMemoryCircuitBreaker::default();
		assert!(!breaker.is_open(&primary()).await);
		assert_eq!(breaker.state(ProcessorName::Primary), CircuitState::default());
	}

	#[tokio::test]
	async fn test_stays_closed_below_threshold() {
		let breaker = InMemoryCircuitBreaker::default();
		fail_times(&breaker, 4).await;

		assert!(!breaker.is_open(&primary()).await);
		assert_eq!(breaker.state(ProcessorName::Primary).consecutive_failures, 4);
	}

	#[tokio::test]
	async fn test_opens_after_five_consecutive_failures() {
		let breaker = InMemoryCircuitBreaker::default();
		fail_times(&breaker, 5).await;

		assert!(breaker.is_open(&primary()).await);
		assert!(!breaker.is_open(&secondary()).await);
	}

	#[tokio::test]
	async fn test_success_resets_failure_count() {
		let breaker = InMemoryCircuitBreaker::default();
		fail_times(&breaker, 4).await;
		breaker.record_success(&primary()).await;
		fail_times(&breaker, 4).await;

		assert!(!breaker.is_open(&primary()).await);
		let state = breaker.state(ProcessorName::Primary);
		assert_eq!(state.consecutive_failures, 4);
		assert!(state.last_failure_at.is_some());
	}

	#[tokio::test(start_paused = true)]
	async fn test_still_open_at_cooldown_boundary() {
		let breaker = InMemoryCircuitBreaker::default();
		fail_times(&breaker, 5).await;

		advance(DEFAULT_COOLDOWN).await;

		assert!(breaker.is_open(&primary()).await);
	}

	#[tokio::test(start_paused = true)]
	async fn test_closes_and_resets_after_cooldown() {
		let breaker = InMemoryCircuitBreaker::default();
		fail_times(&breaker, 5).await;

		advance(DEFAULT_COOLDOWN + Duration::from_millis(1)).await;

		assert!(!breaker.is_open(&primary()).await);
		assert_eq!(breaker.state(ProcessorName::Primary), CircuitState::default());

		breaker.record_failure(&primary()).await;
		assert_eq!(breaker.state(ProcessorName::Primary).consecutive_failures, 1);
		assert!(!breaker.is_open(&primary()).await);
	}

	#[tokio::test(start_paused = true)]
	async fn test_new_failure_extends_open_window() {
		let breaker = InMemoryCircuitBreaker::default();
		fail_times(&breaker, 5).await;

		advance(Duration::from_secs(20)).await;
		breaker.record_failure(&primary()).await;
		advance(Duration::from_secs(20)).await;

		assert!(breaker.is_open(&primary()).await);
		assert_eq!(breaker.state(ProcessorName::Primary).consecutive_failures, 6);
	}

	#[tokio::test]
	async fn test_custom_threshold() {
		let breaker = InMemoryCircuitBreaker::new(2, Duration::from_secs(1));
		fail_times(&breaker, 2).await;

		assert!(breaker.is_open(&primary()).await);
	}
}

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use log::info;
use reqwest::Client;
use tokio::sync::Semaphore;

use crate::domain::processor_client::ProcessorCallError;

pub const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 20;
pub const MAX_CONCURRENT_REQUESTS: usize = 100;
pub const KEEP_ALIVE_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct PooledClient {
	pub client:  Client,
	/// Bounds in-flight requests to a single processor.
	pub permits: Arc<Semaphore>,
}

#[derive(Default)]
struct PoolState {
	clients: HashMap<String, PooledClient>,
	closed:  bool,
}

/// HTTP clients keyed by processor base URL, kept for the lifetime of the
/// process so connections are reused across requests.
#[derive(Clone, Default)]
pub struct ClientPool {
	state: Arc<RwLock<PoolState>>,
}

impl ClientPool {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, base_url: &str) -> Result<PooledClient, ProcessorCallError> {
		{
			let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
			if let Some(pooled) = state.clients.get(base_url) {
				return Ok(pooled.clone());
			}
		}

		let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
		if state.closed {
			return Err(ProcessorCallError::Transport {
				message: "client pool is closed".to_string(),
			});
		}

		match state.clients.entry(base_url.to_string()) {
			Entry::Occupied(entry) => Ok(entry.get().clone()),
			Entry::Vacant(entry) => {
				let client = Client::builder()
					.pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
					.pool_idle_timeout(KEEP_ALIVE_TIMEOUT)
					.tcp_keepalive(KEEP_ALIVE_TIMEOUT)
					.connect_timeout(CONNECT_TIMEOUT)
					.build()
					.map_err(|e| ProcessorCallError::Transport {
						message: e.to_string(),
					})?;
				info!("Created pooled HTTP client for {base_url}");

				let pooled = PooledClient {
					client,
					permits: Arc::new(Semaphore::new(MAX_CONCURRENT_REQUESTS)),
				};
				Ok(entry.insert(pooled).clone())
			}
		}
	}

	pub fn len(&self) -> usize {
		self.state
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clients
			.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drops every pooled client and refuses to create new ones.
	pub fn close(&self) {
		let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
		for pooled in state.clients.values() {
			pooled.permits.close();
		}
		let closed = state.clients.len();
		state.clients.clear();
		state.closed = true;
		info!("Closed {closed} pooled HTTP clients");
	}
}

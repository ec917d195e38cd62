use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorName {
	Primary,
	Secondary,
}

impl ProcessorName {
	pub fn as_str(&self) -> &'static str {
		match self {
			ProcessorName::Primary => "primary",
			ProcessorName::Secondary => "secondary",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"primary" => Some(ProcessorName::Primary),
			"secondary" => Some(ProcessorName::Secondary),
			_ => None,
		}
	}

	pub fn alternate(&self) -> Self {
		match self {
			ProcessorName::Primary => ProcessorName::Secondary,
			ProcessorName::Secondary => ProcessorName::Primary,
		}
	}
}

impl fmt::Display for ProcessorName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A downstream payment processor, fixed at startup.
///
/// `simulated` endpoints never receive network calls: health probes report
/// healthy and payments succeed after a short synthetic delay.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorEndpoint {
	pub name:      ProcessorName,
	pub url:       String,
	pub simulated: bool,
}

impl ProcessorEndpoint {
	pub fn new(name: ProcessorName, url: impl Into<String>) -> Self {
		let url: String = url.into();
		Self {
			name,
			url: url.trim_end_matches('/').to_string(),
			simulated: false,
		}
	}

	pub fn simulated(name: ProcessorName, url: impl Into<String>) -> Self {
		Self {
			simulated: true,
			..Self::new(name, url)
		}
	}

	pub fn is_primary(&self) -> bool {
		self.name == ProcessorName::Primary
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorEndpoints {
	pub primary:   ProcessorEndpoint,
	pub secondary: ProcessorEndpoint,
}

impl ProcessorEndpoints {
	pub fn new(primary: ProcessorEndpoint, secondary: ProcessorEndpoint) -> Self {
		Self { primary, secondary }
	}

	pub fn get(&self, name: ProcessorName) -> &ProcessorEndpoint {
		match name {
			ProcessorName::Primary => &self.primary,
			ProcessorName::Secondary => &self.secondary,
		}
	}

	pub fn alternate_of(&self, name: ProcessorName) -> &ProcessorEndpoint {
		self.get(name.alternate())
	}
}

//! Layered settings.
//!
//! Settings are read from an optional TOML file and then from `OBD_`
//! environment variables, nested keys separated by `__`:
//!
//! ```toml
//! format_version = "V2"
//! animation_seed = 7
//!
//! [read]
//! max_depth = 16
//! unknown_properties = "reject"
//! ```
//!
//! `OBD_READ__MAX_DEPTH=32` overrides `read.max_depth` from the file.

use std::path::Path;

use config::{Config, Environment, FileFormat};
use serde::{Deserialize, Serialize};

use crate::animation::RngSource;
use crate::file::obd::{File, FormatVersion, Passthrough};
use crate::file::{ObdError, ReadConfig};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "OBD";

/// Library settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Limits and policies for decoding
	pub read: ReadConfig,
	/// Version written by containers created through [`Settings::new_file`]
	pub format_version: FormatVersion,
	/// Fixed seed for animation randomness; OS-seeded when absent
	pub animation_seed: Option<u64>,
}

impl Settings {
	/// Loads settings from `path` (if given) and the environment.
	///
	/// # Errors
	///
	/// Returns [`ObdError::Config`] if the file is missing or malformed or a
	/// value has the wrong type.
	pub fn load(path: Option<&Path>) -> Result<Self, ObdError> {
		Self::load_with_env(path, Self::environment())
	}

	/// `OBD_` prefix, `__` between nested keys.
	fn environment() -> Environment {
		Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__")
	}

	fn load_with_env(path: Option<&Path>, environment: Environment) -> Result<Self, ObdError> {
		let mut builder = Config::builder();
		if let Some(path) = path {
			builder = builder.add_source(config::File::from(path).required(true));
		}
		let settings = builder.add_source(environment).build()?.try_deserialize()?;
		Ok(settings)
	}

	/// Parses settings from TOML text, ignoring the environment.
	pub fn from_toml(text: &str) -> Result<Self, ObdError> {
		let settings = Config::builder()
			.add_source(config::File::from_str(text, FileFormat::Toml))
			.build()?
			.try_deserialize()?;
		Ok(settings)
	}

	/// Random source for animators, seeded from `animation_seed` if set.
	pub fn random_source(&self) -> RngSource {
		match self.animation_seed {
			Some(seed) => RngSource::seeded(seed),
			None => RngSource::from_os(),
		}
	}

	/// Creates an empty container of the configured version.
	pub fn new_file(&self) -> File {
		File::new(self.format_version)
	}

	/// Opens a container with the configured read options.
	pub fn open(&self, path: impl AsRef<Path>) -> Result<File, ObdError> {
		let data = std::fs::read(path)?;
		File::from_bytes_with(&data, self.read, &Passthrough)
	}
}

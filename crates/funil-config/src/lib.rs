//! # funil-config
//!
//! Layered configuration loading for funil using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FUNIL_*` prefix, `__` as separator)
//! 2. Project-level `.funil/config.toml`
//! 3. User-level `~/.config/funil/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FUNIL_SUPABASE__URL` -> `supabase.url`,
//! `FUNIL_BOARD__DIVERGENCE_POLICY` -> `board.divergence_policy`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use funil_config::FunilConfig;
//!
//! let config = FunilConfig::load_with_dotenv().expect("config");
//!
//! if config.supabase.is_configured() {
//!     println!("Supabase URL: {}", config.supabase.url);
//! }
//! ```

mod board;
mod error;
mod general;
mod supabase;

pub use board::BoardConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use supabase::SupabaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment prefix for every override.
pub const ENV_PREFIX: &str = "FUNIL_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FunilConfig {
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FunilConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".funil/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("funil").join("config.toml"))
    }
}

//! Environment-driven configuration
//!
//! Every setting has a default, so the binary runs with no environment at
//! all. Values are read after `dotenvy::dotenv()` has loaded any `.env` file.
//!
//! | Variable                 | Default                              |
//! |--------------------------|--------------------------------------|
//! | `POKEAPI_BASE_URL`       | `https://pokeapi.co/api/v2/pokemon`  |
//! | `DATABASE_URL`           | `sqlite:poke_keeper.db`              |
//! | `POKE_KEEPER_STORE_KEY`  | `caughtPokemons`                     |
//! | `POKE_KEEPER_USER_AGENT` | `poke-keeper/<crate version>`        |

use tracing::info;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:poke_keeper.db";
pub const DEFAULT_STORE_KEY: &str = "caughtPokemons";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog_base_url: String,
    pub database_url: String,
    /// Preference key holding the encoded collection
    pub store_key: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            store_key: DEFAULT_STORE_KEY.to_string(),
            user_agent: concat!("poke-keeper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup, falling back to
    /// defaults for missing or blank values
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |name: &str, fallback: String| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
        };

        let config = Self {
            catalog_base_url: read("POKEAPI_BASE_URL", defaults.catalog_base_url),
            database_url: read("DATABASE_URL", defaults.database_url),
            store_key: read("POKE_KEEPER_STORE_KEY", defaults.store_key),
            user_agent: read("POKE_KEEPER_USER_AGENT", defaults.user_agent),
        };

        info!(
            "Using catalog {} and database {}",
            config.catalog_base_url, config.database_url
        );
        config
    }
}

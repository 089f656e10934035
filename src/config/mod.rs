//! Application configuration and secret loading

pub mod loader;
pub mod secrets;
pub mod types;

pub use loader::load_config;
pub use secrets::{load_credentials, EnvSecretProvider, StaticSecretProvider};
pub use types::{AppConfig, AppSettings, BitflyerConfig, BuyConfig};

//! bitFlyer module - Client implementation for the bitFlyer Lightning REST API

pub mod auth;
pub mod messages;
pub mod rest;

pub use auth::ApiCredentials;
pub use rest::BitflyerRestClient;

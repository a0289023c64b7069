// cxsync-api: Async Rust client for the AOS-CX switch REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod full_config;
mod interfaces;
pub mod session;
mod vlans;

pub use auth::Credentials;
pub use client::{CreateStatus, SwitchClient, WriteMode};
pub use error::Error;
pub use models::{InterfacePayload, ReferenceMap, UserConfig, VlanPayload};
pub use transport::{TlsMode, TransportConfig};

//! Client side of the Evolution API (a WhatsApp messaging gateway).
//!
//! This crate is the request engine used by `evolution-mcp`:
//! - [`config`]: gateway credentials, validated once at startup
//! - [`endpoint`]: endpoint descriptors and the gateway's path grammar
//! - [`client`]: the single HTTP-call primitive and its outcome classification
//!
//! It knows nothing about MCP or about individual tools.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod redact;

pub use client::{Gateway, GatewayClient};
pub use config::{ConfigError, GatewayConfig};
pub use endpoint::{Endpoint, QueryParams};
pub use error::{CallError, ErrorKind};
pub use reqwest::Method;

//! MCP server exposing Evolution API (WhatsApp gateway) operations as tools.
//!
//! Each tool call is validated against the tool's input schema, mapped to one
//! [`evolution_gateway_client::Endpoint`], executed once, and returned as a success or error
//! envelope ([`envelope`]).

pub mod annotations;
pub mod catalog;
pub mod cli;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod logging;
pub mod tools;
pub mod validation;

pub use catalog::Catalog;
pub use error::{Result, ServerError};
pub use handler::EvolutionServer;

//! cw - send Chatwork messages and files to rooms by name
//!
//! This library provides the API client behind the `cw` command.

pub mod api;
pub mod config;
pub mod credentials;
pub mod types;

pub use api::client::ChatworkClient;
pub use config::Config;

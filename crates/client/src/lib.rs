//! Terminal client for a remote chess server. The server owns the rules;
//! this crate draws its positions and turns clicks into move requests.

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod poller;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod ui;

pub mod batching;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod generator;
pub mod logging;
pub mod processor;
pub mod storage;

// Use cases and the ports they drive
pub mod app;
// Adapters behind those ports
pub mod infra;

//! # Configuration
//!
//! Static configuration for the hosted backend the client talks to.

pub mod backend;

pub use backend::BackendConfig;

#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

//! Core of the chat client that does not depend on the UI framework:
//! backend service abstractions, the session cache, the route table with its
//! navigation guard, and the foreground notification bridge.

pub mod backend;
pub mod config;
pub mod errors;
pub mod models;
pub mod notify;
pub mod routing;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BackendClient, Capabilities};
pub use config::BackendConfig;
pub use errors::{BackendError, BackendResult};
pub use notify::{NotificationBridge, ToastDisplay};
pub use session::SessionStore;

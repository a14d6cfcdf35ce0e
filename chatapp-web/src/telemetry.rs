//! `tracing` output routed to the browser console.

use crate::config::DEFAULT_LOG_LEVEL;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_wasm::{ConsoleConfig, WASMLayer, WASMLayerConfigBuilder};

/// Install the global subscriber. `level` is an `EnvFilter` directive; an
/// unparsable one falls back to the default level.
pub fn init(level: &str) {
    let filter =
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let console = WASMLayerConfigBuilder::new()
        .set_report_logs_in_timings(false)
        .set_console_config(ConsoleConfig::ReportWithConsoleColor)
        .build();
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(WASMLayer::new(console))
        .try_init();
    if let Err(err) = installed {
        web_sys::console::warn_1(&format!("tracing already initialized: {err}").into());
    }
}

//! Runtime configuration.

mod settings;

pub use settings::{DbSettings, Settings, DEFAULT_LISTEN_ADDR, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_CONNECTIONS};

//! # TeleBot Transport
//!
//! Network transport implementations for the TeleBot client.
//!
//! The core defines the [`Transport`](telebot_core::Transport) seam; this
//! crate provides concrete implementations behind feature flags.
//!
//! ## Features
//!
//! - `http-client` (default): [`HttpTransport`] over `reqwest`
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  TeleBot client     │  (typed methods, batches)
//! ├─────────────────────┤
//! │  telebot-core       │  (Transport trait, Dispatcher)
//! ├─────────────────────┤
//! │  telebot-transport  │  <- This crate (implementations)
//! ├─────────────────────┤
//! │  Network (HTTPS)    │
//! └─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use telebot_core::Dispatcher;
//! use telebot_transport::HttpTransport;
//!
//! let transport = HttpTransport::new(std::time::Duration::from_secs(30))?;
//! let dispatcher = Dispatcher::new(Arc::new(transport));
//! ```

#[cfg(feature = "http-client")]
pub mod http;

#[cfg(feature = "http-client")]
pub use http::{DEFAULT_TIMEOUT, HttpTransport};

//! # Utility Modules
//!
//! Supporting utilities.
//!
//! ## Components
//! - **Logging**: tracing subscriber setup from [`LoggingConfig`]
//!
//! [`LoggingConfig`]: crate::config::LoggingConfig

pub mod logging;

pub mod config;
pub mod error;
pub mod files;
pub mod models;
pub mod service;

pub use config::{AppConfig, OutputFormat};
pub use error::{ReconcileError, Result};
pub use service::reconcile;

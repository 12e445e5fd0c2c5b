mod init_tracing;
mod log_sanitizer;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use log_sanitizer::{mask_email, sanitize_text};
pub use tracing_config::{DEFAULT_LOG_FILTER, TracingConfig};

/// Filter used when neither `RUST_LOG` nor settings provide one.
pub const DEFAULT_LOG_FILTER: &str = "info,kargoline=debug";

/// How the process logs: plain or JSON lines, filtered by `RUST_LOG` when set
/// and by `filter` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            json_format: false,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn with_json(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }

    /// A blank filter keeps the current one.
    pub fn with_filter(mut self, filter: &str) -> Self {
        if !filter.trim().is_empty() {
            self.filter = filter.trim().to_string();
        }
        self
    }
}

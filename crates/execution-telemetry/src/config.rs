/// Execution tracing configuration
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// If executions should be traced at all.
    pub enabled: bool,
    /// Record the sanitized document on the span. Disabled by default.
    pub record_document: bool,
    /// Operation names that are never traced, such as health checks.
    pub ignored_operations: Vec<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            record_document: false,
            ignored_operations: Vec::new(),
        }
    }
}

impl TelemetryConfig {
    /// Whether a request for the given operation should be traced.
    pub fn traces_operation(&self, operation_name: Option<&str>) -> bool {
        if !self.enabled {
            return false;
        }

        match operation_name {
            Some(name) => !self.ignored_operations.iter().any(|ignored| ignored == name),
            None => true,
        }
    }
}

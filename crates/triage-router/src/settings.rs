use std::time::Duration;

/// Per-run limits applied to every external call.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub classifier_timeout: Duration,
    pub backend_timeout: Duration,
    pub report_timeout: Duration,
    /// Upper bound on in-flight prediction calls within one run. 0 is
    /// treated as 1.
    pub max_concurrent_backend_calls: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            classifier_timeout: Duration::from_secs(10),
            backend_timeout: Duration::from_secs(15),
            report_timeout: Duration::from_secs(60),
            max_concurrent_backend_calls: 4,
        }
    }
}

use crate::header::HeaderRowRule;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Providers endpoint; the location filter is appended as `?location=`.
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub header_row_rule: HeaderRowRule,
}

// Runtime configuration
// The validated view of configuration handed to the application layer

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub public_base_url: String,
    pub data_dir: Option<String>,
    pub roster_path: String,
    pub default_match_duration_minutes: u32,
    pub notify_webhook_url: Option<String>,
    pub notify_webhook_template: Option<String>,
    pub notify_webhook_token: Option<String>,
    pub notify_group_id: Option<i64>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

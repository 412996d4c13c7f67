use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "foreclosure-registry",
    version,
    about = "Server-rendered dashboard for the foreclosure registry"
)]
pub struct Config {
    #[arg(
        long,
        env = "REGISTRY_BIND",
        default_value = "127.0.0.1:8080",
        help = "Address the dashboard listens on."
    )]
    pub bind: SocketAddr,

    #[arg(
        long,
        env = "REGISTRY_API_BASE_URL",
        default_value = "http://localhost:3000/api/v1",
        help = "Base URL of the remote record service."
    )]
    pub api_base_url: String,

    #[arg(long, env = "REGISTRY_WORKERS", default_value_t = 8)]
    pub workers: usize,

    #[arg(
        long,
        env = "REGISTRY_REQUEST_TIMEOUT_SECS",
        default_value_t = 30,
        help = "Timeout for each call to the record service."
    )]
    pub request_timeout_secs: u64,

    #[arg(
        long,
        env = "REGISTRY_SESSION_TTL_SECS",
        default_value_t = 60 * 60 * 24 * 7,
        help = "Lifetime of a dashboard session."
    )]
    pub session_ttl_secs: i64,

    #[arg(
        long,
        env = "REGISTRY_REPORT_HEADING",
        default_value = "PED Foreclosure Management",
        help = "Heading printed on exported reports."
    )]
    pub report_heading: String,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            api_base_url: "http://localhost:3000/api/v1".to_string(),
            workers: 8,
            request_timeout_secs: 30,
            session_ttl_secs: 60 * 60 * 24 * 7,
            report_heading: "PED Foreclosure Management".to_string(),
        }
    }
}

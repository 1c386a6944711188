use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub server_name: String,
    pub bind_addr: String,
    pub rest_port: u16,
    /// The single bearer credential accepted under `/api/v1/`.
    pub access_token: String,
    pub log_request_headers: bool,
    pub cors_origins: Vec<String>,
}

pub const DEFAULT_ACCESS_TOKEN: &str = "ainas-token";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let access_token = std::env::var("ACCESS_TOKEN")
            .unwrap_or_else(|_| DEFAULT_ACCESS_TOKEN.to_string())
            .trim()
            .to_string();
        if access_token.is_empty() {
            anyhow::bail!("ACCESS_TOKEN must not be empty");
        }

        Ok(Config {
            server_name: std::env::var("SERVER_NAME")
                .unwrap_or_else(|_| "AI-NAS Stub".to_string()),
            bind_addr: std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            rest_port: std::env::var("REST_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            access_token,
            log_request_headers: parse_flag(
                &std::env::var("LOG_REQUEST_HEADERS").unwrap_or_else(|_| "true".to_string()),
            )?,
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }

    /// Configuration used by router tests: fixed token, header logging off.
    #[cfg(test)]
    pub fn for_test(access_token: &str) -> Self {
        Config {
            server_name: "test".to_string(),
            bind_addr: "127.0.0.1".to_string(),
            rest_port: 0,
            access_token: access_token.to_string(),
            log_request_headers: false,
            cors_origins: Vec::new(),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.rest_port)
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean value: {}", other),
    }
}

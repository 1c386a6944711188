pub mod skills;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use skills::SkillsClient;

pub const API_PREFIX: &str = "/api/v1";

/// `{code, message, data, requestId}` as returned by every endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T = Value> {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: T,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response is not an envelope (HTTP {status}): {body}")]
    NotEnvelope { status: u16, body: String },
    #[error("API error: {message} (code={code}, requestId={})", .request_id.as_deref().unwrap_or("?"))]
    Api {
        code: u16,
        message: String,
        request_id: Option<String>,
    },
    #[error("unexpected response data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// A decoded response together with its transport status.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub envelope: ApiResponse,
}

impl Reply {
    /// Accept only `code == 200` envelopes and decode their data.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        if self.envelope.code != 200 {
            return Err(ClientError::Api {
                code: self.envelope.code,
                message: self.envelope.message,
                request_id: self.envelope.request_id,
            });
        }
        Ok(serde_json::from_value(self.envelope.data)?)
    }
}

pub fn decode_reply(status: u16, body: &str) -> Result<Reply, ClientError> {
    let envelope = serde_json::from_str::<ApiResponse>(body).map_err(|_| {
        ClientError::NotEnvelope {
            status,
            body: body.to_string(),
        }
    })?;
    Ok(Reply { status, envelope })
}

// --- Request types ---

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilesParams {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_type: Option<String>,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchMediaParams {
    pub query: String,
    pub media_type: String,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileActionParams {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionParams {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
}

// --- Client ---

pub struct NasClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl NasClient {
    /// `server_url` is the server root; requests go to `{server_url}/api/v1/...`.
    pub fn new(server_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: format!("{}{}", server_url.trim_end_matches('/'), API_PREFIX),
            token: token.map(str::to_string),
            client: reqwest::Client::new(),
        }
    }

    /// Same server, different (or no) credential.
    pub fn with_token(&self, token: Option<&str>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token: token.map(str::to_string),
            client: self.client.clone(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and decode the envelope whatever its code.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> Result<Reply, ClientError> {
        let mut req = self.client.request(method.clone(), self.url(path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        tracing::debug!(%method, path, status, "API response");

        decode_reply(status, &text)
    }

    pub async fn post(&self, path: &str, body: &impl Serialize) -> Result<Reply, ClientError> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(&body), &[]).await
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Reply, ClientError> {
        self.send(Method::GET, path, None, query).await
    }

    pub async fn search_files(&self, params: &SearchFilesParams) -> Result<Value, ClientError> {
        self.post("files/search", params).await?.into_data()
    }

    pub async fn file_action(&self, params: &FileActionParams) -> Result<Value, ClientError> {
        self.post("files/actions", params).await?.into_data()
    }

    pub async fn search_media(&self, params: &SearchMediaParams) -> Result<Value, ClientError> {
        self.post("media/ai-search", params).await?.into_data()
    }

    pub async fn album_categories(&self, kind: Option<&str>) -> Result<Value, ClientError> {
        let query: Vec<(&str, &str)> = kind.map(|k| ("type", k)).into_iter().collect();
        self.get("media/albums/categories", &query).await?.into_data()
    }

    pub async fn system_status(&self) -> Result<Value, ClientError> {
        self.get("system/status", &[]).await?.into_data()
    }

    pub async fn check_permission(&self, params: &PermissionParams) -> Result<bool, ClientError> {
        #[derive(Deserialize)]
        struct Granted {
            granted: bool,
        }
        let granted: Granted = self.post("auth/check-permission", params).await?.into_data()?;
        Ok(granted.granted)
    }
}

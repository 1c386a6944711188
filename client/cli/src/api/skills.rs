//! Client for the assistant skills service (`/assistant/skills`).

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::{decode_reply, ClientError};

pub struct SkillsClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    pub prerequisites: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SkillList {
    skills: Vec<Skill>,
}

#[derive(Debug, Serialize)]
struct ToggleRequest {
    enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillUpdate {
    pub id: String,
    pub enabled: bool,
    pub updated_time: Option<String>,
}

impl SkillsClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Skill>, ClientError> {
        let url = format!("{}/assistant/skills", self.base_url);

        let resp = self.client.get(&url).bearer_auth(&self.token).send().await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let list: SkillList = decode_reply(status, &body)?.into_data()?;
        Ok(list.skills)
    }

    /// `{base}/assistant/skills/{id}` with `id` escaped as a single path segment.
    fn skill_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["assistant", "skills", id]);
        Ok(url)
    }

    pub async fn toggle(&self, id: &str, enabled: bool) -> Result<SkillUpdate, ClientError> {
        let url = self.skill_url(id)?;

        let resp = self
            .client
            .patch(url)
            .bearer_auth(&self.token)
            .json(&ToggleRequest { enabled })
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        decode_reply(status, &body)?.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_list_decoding() {
        let body = r#"{
            "code": 200,
            "message": "OK",
            "data": {"skills": [
                {"id": "weather", "name": "Weather", "description": "Forecasts", "enabled": true},
                {"id": "gh", "name": "GitHub", "description": "", "enabled": false,
                 "prerequisites": "Requires binaries: gh"}
            ]},
            "requestId": "r"
        }"#;
        let list: SkillList = decode_reply(200, body).unwrap().into_data().unwrap();
        assert_eq!(list.skills.len(), 2);
        assert!(list.skills[0].enabled);
        assert_eq!(list.skills[1].prerequisites.as_deref(), Some("Requires binaries: gh"));
    }

    #[test]
    fn test_skill_url_escapes_id() {
        let client = SkillsClient::new("http://localhost:18789/", "t");
        assert_eq!(
            client.skill_url("weather").unwrap().as_str(),
            "http://localhost:18789/assistant/skills/weather"
        );
        assert_eq!(
            client.skill_url("a b/c").unwrap().as_str(),
            "http://localhost:18789/assistant/skills/a%20b%2Fc"
        );
    }

    #[test]
    fn test_skill_url_keeps_base_path() {
        let client = SkillsClient::new("http://nas.local/gateway", "t");
        assert_eq!(
            client.skill_url("gh").unwrap().as_str(),
            "http://nas.local/gateway/assistant/skills/gh"
        );
        assert!(SkillsClient::new("not a url", "t").skill_url("gh").is_err());
    }

    #[test]
    fn test_skill_update_decoding() {
        let body = r#"{"code":200,"message":"Skill updated successfully",
            "data":{"id":"weather","enabled":false,"updatedTime":"2026-01-01T00:00:00Z"},
            "requestId":"r"}"#;
        let update: SkillUpdate = decode_reply(200, body).unwrap().into_data().unwrap();
        assert_eq!(update.id, "weather");
        assert!(!update.enabled);
    }
}

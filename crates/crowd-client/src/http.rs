use async_trait::async_trait;
use crowd_core::{CrowdError, Result, TargetKind, VoteDirection};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::service::*;

/// JSON-over-HTTP client for a live Q&A service.
pub struct HttpQaClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQaClient {
    /// `base_url` must be an absolute http(s) URL; a trailing slash is ignored.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| CrowdError::Config(format!("invalid base url '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CrowdError::Config(format!(
                "unsupported scheme '{}' in base url",
                parsed.scheme()
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CrowdError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `body` to `path`, returning the parsed JSON reply or the raw
    /// status and body of a non-success response.
    async fn post(
        &self,
        path: &str,
        credential: Option<&str>,
        body: serde_json::Value,
    ) -> Result<std::result::Result<serde_json::Value, (StatusCode, String)>> {
        let mut req = self.client.post(self.endpoint(path)).json(&body);
        if let Some(token) = credential {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| CrowdError::Transport(e.to_string()))?;

        let status = resp.status();
        debug!(path, status = status.as_u16(), "remote call");
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Ok(Err((status, text)));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| CrowdError::Transport(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Ok(serde_json::Value::Null));
        }
        let data = serde_json::from_str(&text)
            .map_err(|e| CrowdError::Transport(format!("invalid response body: {e}")))?;
        Ok(Ok(data))
    }

    /// Like [`post`](Self::post), with every non-success status a rejection.
    async fn post_ok(
        &self,
        path: &str,
        credential: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value> {
        self.post(path, Some(credential), body)
            .await?
            .map_err(|(status, body)| CrowdError::RemoteRejection {
                status: status.as_u16(),
                body,
            })
    }
}

/// Identifiers come back as strings, but accept numbers too.
fn id_field(data: &serde_json::Value, field: &str) -> Result<String> {
    match &data[field] {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(CrowdError::Transport(format!(
            "response is missing '{field}'"
        ))),
    }
}

#[async_trait]
impl QaService for HttpQaClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn register(&self, name: &str, description: &str) -> Result<Registration> {
        let body = serde_json::json!({ "name": name, "description": description });
        let data = match self.post("/api/agents/register", None, body).await? {
            Ok(data) => data,
            Err((status, _)) if status == StatusCode::BAD_REQUEST || status == StatusCode::CONFLICT => {
                return Err(CrowdError::RegistrationConflict(name.to_string()));
            }
            Err((status, body)) => {
                return Err(CrowdError::RemoteRejection {
                    status: status.as_u16(),
                    body,
                });
            }
        };

        let agent = &data["agent"];
        let credential = agent["apiKey"]
            .as_str()
            .ok_or_else(|| CrowdError::Transport("registration reply has no apiKey".into()))?
            .to_string();
        let accepted = agent["name"].as_str().unwrap_or(name).to_string();
        Ok(Registration {
            name: accepted,
            credential,
        })
    }

    async fn create_question(
        &self,
        credential: &str,
        title: &str,
        content: &str,
        tags: &[String],
    ) -> Result<CreatedQuestion> {
        let body = serde_json::json!({ "title": title, "content": content, "tags": tags });
        let data = self.post_ok("/api/questions", credential, body).await?;
        Ok(CreatedQuestion {
            id: id_field(&data, "id")?,
            title: data["title"].as_str().unwrap_or(title).to_string(),
        })
    }

    async fn create_answer(
        &self,
        credential: &str,
        question_id: &str,
        content: &str,
    ) -> Result<CreatedAnswer> {
        let path = format!("/api/questions/{question_id}/answers");
        let data = self
            .post_ok(&path, credential, serde_json::json!({ "content": content }))
            .await?;
        Ok(CreatedAnswer {
            id: id_field(&data, "id")?,
        })
    }

    async fn vote(
        &self,
        credential: &str,
        target_id: &str,
        target: TargetKind,
        direction: VoteDirection,
    ) -> Result<()> {
        let path = format!("/api/{}s/{}/vote", target.as_str(), target_id);
        self.post_ok(&path, credential, serde_json::json!({ "voteType": direction.as_str() }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(HttpQaClient::new("not a url", Duration::from_secs(1)).is_err());
        assert!(HttpQaClient::new("ftp://example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = HttpQaClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint("/api/questions"), "http://localhost:5000/api/questions");
        assert_eq!(client.name(), "http");
    }

    #[test]
    fn test_id_field_accepts_numbers() {
        let data = serde_json::json!({ "id": 42 });
        assert_eq!(id_field(&data, "id").unwrap(), "42");
        assert!(id_field(&serde_json::json!({}), "id").is_err());
    }
}

use actix_web::http::{header, StatusCode};
use secstr::SecUtf8;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Repository {
    pub full_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Release {
    pub name: String,
    pub tag_name: String,
    pub body: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ReleaseEvent {
    pub action: Option<String>,
    pub release: Release,
    pub repository: Repository,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CommitDetail {
    pub message: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ComparisonCommit {
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CommitComparison {
    pub html_url: String,
    pub commits: Vec<ComparisonCommit>,
}

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("failed to send compare request: {0}")]
    Request(String),
    #[error("compare API returned {status}: {body}")]
    BadStatus { status: StatusCode, body: String },
    #[error("failed to parse compare response: {0}")]
    Json(String),
}

#[derive(Clone)]
pub struct GithubClient {
    http: awc::Client,
    api_base: String,
    token: Option<SecUtf8>,
}

impl GithubClient {
    pub fn new(http: awc::Client, api_base: String, token: Option<SecUtf8>) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub async fn compare(
        &self,
        repo: &str,
        base_head: &str,
    ) -> Result<CommitComparison, CompareError> {
        let url = format!("{}/repos/{}/compare/{}", self.api_base, repo, base_head);

        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(
                header::AUTHORIZATION,
                format!("Bearer {}", token.unsecure()),
            );
        }

        let mut response = request
            .send()
            .await
            .map_err(|err| CompareError::Request(err.to_string()))?;

        if !response.status().is_success() {
            let body = response
                .body()
                .await
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default();
            return Err(CompareError::BadStatus {
                status: response.status(),
                body,
            });
        }

        response
            .json::<CommitComparison>()
            .limit(1024 * 1024)
            .await
            .map_err(|err| CompareError::Json(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_release_event() {
        let event: ReleaseEvent = serde_json::from_str(
            r#"{
                "action": "published",
                "release": {
                    "name": "Release 2",
                    "tag_name": "v2",
                    "body": "**Full Changelog**: https://github.com/o/r/compare/v1...v2"
                },
                "repository": { "full_name": "o/r" }
            }"#,
        )
        .unwrap();

        assert_eq!(event.action.as_deref(), Some("published"));
        assert_eq!(event.release.tag_name, "v2");
        assert_eq!(event.repository.full_name, "o/r");
    }

    #[test]
    fn release_event_action_is_optional() {
        let event: ReleaseEvent = serde_json::from_str(
            r#"{
                "release": { "name": "n", "tag_name": "t", "body": "b" },
                "repository": { "full_name": "o/r" }
            }"#,
        )
        .unwrap();

        assert!(event.action.is_none());
    }

    #[test]
    fn deserializes_commit_comparison() {
        let comparison: CommitComparison = serde_json::from_str(
            r#"{
                "html_url": "https://github.com/o/r/compare/v1...v2",
                "commits": [
                    { "commit": { "message": "Fix bug (#42)\n\nlonger body" } },
                    { "commit": { "message": "Add feature" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(comparison.commits.len(), 2);
        assert_eq!(comparison.commits[1].commit.message, "Add feature");
    }
}

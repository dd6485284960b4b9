use actix_web::{http::StatusCode, web, HttpResponse};

use crate::{
    changelog,
    github::{CompareError, GithubClient, ReleaseEvent},
    slack::{DeliveryError, NotificationPayload, SlackWebhook},
};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HookQuery {
    pub destination: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReleaseHookError {
    #[error("`destination` query param is required")]
    MissingDestination,
    #[error("only published releases are processed")]
    IgnoredAction,
    #[error("release body doesn't end with a compare URL")]
    NoCompareRef,
    #[error("failed to fetch commit comparison: {0}")]
    Compare(#[from] CompareError),
    #[error("failed to deliver notification: {0}")]
    Delivery(#[from] DeliveryError),
}

impl actix_web::ResponseError for ReleaseHookError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReleaseHookError::MissingDestination => StatusCode::BAD_REQUEST,
            ReleaseHookError::IgnoredAction => StatusCode::OK,
            ReleaseHookError::NoCompareRef => StatusCode::UNPROCESSABLE_ENTITY,
            ReleaseHookError::Compare(_) => StatusCode::BAD_GATEWAY,
            ReleaseHookError::Delivery(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, serde::Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, serde::Serialize)]
struct HookResponse {
    payload: NotificationPayload,
    slack_response: String,
}

pub async fn release_hook(
    web::Query(query): web::Query<HookQuery>,
    web::Json(event): web::Json<ReleaseEvent>,
    github: web::Data<GithubClient>,
    slack: web::Data<SlackWebhook>,
) -> Result<HttpResponse, ReleaseHookError> {
    let destination = query
        .destination
        .ok_or(ReleaseHookError::MissingDestination)?;

    if let Some(action) = &event.action {
        if action != "published" {
            return Err(ReleaseHookError::IgnoredAction);
        }
    }

    let repo = &event.repository.full_name;
    let tag = &event.release.tag_name;
    let base_head =
        changelog::compare_ref(&event.release.body).ok_or(ReleaseHookError::NoCompareRef)?;

    tracing::info!(
        repo = repo.as_str(),
        tag = tag.as_str(),
        "Building changelog for {} {} from {}",
        repo,
        tag,
        base_head,
    );

    let comparison = match github.compare(repo, base_head).await {
        Ok(comparison) => comparison,
        Err(err) => {
            tracing::error!("Failed to fetch comparison for {}: {}", repo, err);
            return Err(err.into());
        }
    };

    let payload = NotificationPayload {
        changelog: changelog::render(&comparison.commits),
        changelog_url: comparison.html_url,
        tag_name: tag.clone(),
        release_url: format!("https://github.com/{}/releases/tag/{}", repo, tag),
        release_name: event.release.name.clone(),
    };

    let receipt = match slack.deliver(&destination, &payload).await {
        Ok(receipt) => receipt,
        Err(err) => {
            tracing::error!("Failed to notify {}: {}", destination, err);
            return Err(err.into());
        }
    };

    Ok(HttpResponse::build(receipt.status).json(HookResponse {
        payload,
        slack_response: receipt.body,
    }))
}

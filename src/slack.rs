use actix_web::http::StatusCode;

#[derive(Debug, Clone, serde::Serialize)]
pub struct NotificationPayload {
    pub release_name: String,
    pub tag_name: String,
    pub changelog: String,
    pub release_url: String,
    pub changelog_url: String,
}

#[derive(Debug)]
pub struct DeliveryReceipt {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to send notification: {0}")]
    Request(String),
    #[error("failed to read notification response: {0}")]
    Body(String),
}

#[derive(Clone)]
pub struct SlackWebhook {
    http: awc::Client,
}

impl SlackWebhook {
    pub fn new(http: awc::Client) -> Self {
        Self { http }
    }

    // The destination's response is passed through to the caller verbatim,
    // whatever its status.
    pub async fn deliver(
        &self,
        url: &str,
        payload: &NotificationPayload,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let mut response = self
            .http
            .post(url)
            .send_json(payload)
            .await
            .map_err(|err| DeliveryError::Request(err.to_string()))?;

        let status = response.status();
        let body = response
            .body()
            .await
            .map_err(|err| DeliveryError::Body(err.to_string()))?;

        Ok(DeliveryReceipt {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

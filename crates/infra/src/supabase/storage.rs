//! Object storage adapter for avatar uploads

use async_trait::async_trait;
use chrono::Utc;
use mediatracker_core::AvatarStorage;
use mediatracker_domain::{constants::AVATAR_BUCKET, MediaTrackerError, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use tracing::info;

use super::SupabaseEndpoints;
use crate::http::HttpClient;

/// Uploads avatar images to the public avatars bucket.
pub struct StorageClient {
    http: HttpClient,
    endpoints: SupabaseEndpoints,
}

impl StorageClient {
    pub fn new(http: HttpClient, endpoints: SupabaseEndpoints) -> Self {
        Self { http, endpoints }
    }
}

/// Object name for one user's avatar. Timestamped so a re-upload never
/// fights the CDN cache of the previous image.
fn avatar_object_name(user_id: &str) -> String {
    format!("{user_id}-{}.jpg", Utc::now().timestamp())
}

#[async_trait]
impl AvatarStorage for StorageClient {
    async fn upload_avatar(&self, user_id: &str, bytes: Vec<u8>) -> Result<String> {
        if bytes.is_empty() {
            return Err(MediaTrackerError::Storage("avatar image is empty".into()));
        }

        let name = avatar_object_name(user_id);
        let url = self.endpoints.storage_object(AVATAR_BUCKET, &name)?;

        let request = self
            .http
            .request(Method::POST, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("image/jpeg"))
            .body(bytes);

        let response = self.http.send(request).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MediaTrackerError::Storage(format!("{status}: {body}")));
        }

        let public_url = self.endpoints.storage_public_url(AVATAR_BUCKET, &name)?;
        info!(user_id = %user_id, object = %name, "avatar uploaded");
        Ok(public_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_are_per_user_and_timestamped() {
        let name = avatar_object_name("u1");
        assert!(name.starts_with("u1-"));
        assert!(name.ends_with(".jpg"));
    }
}

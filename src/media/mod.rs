/// 이미지 업로드
/// 외부 이미지 호스팅에 바이트를 그대로 전달하고 URL 만 돌려준다
// region:    --- Imports
use crate::config::MediaConfig;
use crate::error::{AppError, AppResult};
use crate::users::model::User;
use async_trait::async_trait;
use axum::body::Bytes;
use serde::Deserialize;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Media Host Trait
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, bytes: Bytes, content_type: &str) -> AppResult<String>;
}

/// 업로드 요청 검사
pub fn check_upload(bytes: &Bytes, content_type: Option<&str>) -> AppResult<String> {
    if bytes.is_empty() {
        return Err(AppError::Validation("File is empty".into()));
    }
    match content_type {
        Some(content_type) if content_type.starts_with("image/") => Ok(content_type.to_string()),
        _ => Err(AppError::Validation("Only image uploads are allowed".into())),
    }
}

/// 이미지 업로드 처리, 로그인한 사용자 누구나 가능
pub async fn handle_upload_image(
    media: &dyn MediaHost,
    user: &User,
    bytes: Bytes,
    content_type: Option<&str>,
) -> AppResult<String> {
    let content_type = check_upload(&bytes, content_type)?;
    let url = media.upload(bytes, &content_type).await?;
    info!("{:<12} --> 업로드 완료: user={}, url={}", "Media", user.id, url);
    Ok(url)
}

// endregion: --- Media Host Trait

// region:    --- Http Media Host
pub struct HttpMediaHost {
    client: reqwest::Client,
    config: MediaConfig,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: Option<String>,
    secure_url: Option<String>,
}

impl HttpMediaHost {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MediaHost for HttpMediaHost {
    async fn upload(&self, bytes: Bytes, content_type: &str) -> AppResult<String> {
        if self.config.upload_url.is_empty() {
            return Err(AppError::Media("media host is not configured".into()));
        }
        info!(
            "{:<12} --> 이미지 업로드: {} bytes, {}",
            "Media",
            bytes.len(),
            content_type
        );

        let response = self
            .client
            .post(&self.config.upload_url)
            .bearer_auth(&self.config.api_key)
            .query(&[("folder", self.config.folder.as_str())])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                error!("{:<12} --> 업로드 요청 실패: {}", "Media", e);
                AppError::Media("upload request failed".into())
            })?;

        if !response.status().is_success() {
            error!(
                "{:<12} --> 업로드 거절: status={}",
                "Media",
                response.status()
            );
            return Err(AppError::Media(format!(
                "host responded with {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Media(format!("invalid host response: {}", e)))?;

        body.secure_url
            .or(body.url)
            .ok_or_else(|| AppError::Media("host response has no url".into()))
    }
}

// endregion: --- Http Media Host

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_upload_is_rejected() {
        assert!(check_upload(&Bytes::new(), Some("image/png")).is_err());
    }

    #[test]
    fn non_image_is_rejected() {
        let bytes = Bytes::from_static(b"%PDF-1.7");
        assert!(check_upload(&bytes, Some("application/pdf")).is_err());
        assert!(check_upload(&bytes, None).is_err());
    }

    #[test]
    fn image_is_accepted() {
        let bytes = Bytes::from_static(&[0x89, b'P', b'N', b'G']);
        assert_eq!(check_upload(&bytes, Some("image/png")).unwrap(), "image/png");
    }

    #[tokio::test]
    async fn unconfigured_host_fails_with_media_error() {
        let host = HttpMediaHost::new(MediaConfig {
            upload_url: String::new(),
            api_key: String::new(),
            folder: "farm-market".into(),
        });
        let result = host.upload(Bytes::from_static(b"img"), "image/png").await;
        assert!(matches!(result, Err(AppError::Media(_))));
    }
}

/// 세션 토큰 검증
/// 토큰 발급은 외부 인증 서버 담당, 여기서는 HS256 서명과 만료만 확인한다.
use crate::error::AppError;
use axum::http::HeaderValue;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 외부 인증 서버의 사용자 식별자
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: i64,
}

/// Authorization 헤더에서 Bearer 토큰 추출 후 검증
pub fn decode_bearer(header: Option<&HeaderValue>, secret: &str) -> Result<Claims, AppError> {
    let token = header
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        debug!("{:<12} --> 토큰 검증 실패: {}", "Auth", e);
        AppError::Unauthorized
    })?
    .claims;

    if claims.sub.trim().is_empty() {
        return Err(AppError::Unauthorized);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(sub: &str, exp: i64, secret: &str) -> HeaderValue {
        let claims = Claims {
            sub: sub.to_string(),
            email: Some("farmer@example.com".into()),
            name: None,
            exp,
        };
        let jwt = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        HeaderValue::from_str(&format!("Bearer {}", jwt)).unwrap()
    }

    #[test]
    fn accepts_valid_token() {
        let header = token("auth|42", Utc::now().timestamp() + 3600, "secret");
        let claims = decode_bearer(Some(&header), "secret").unwrap();
        assert_eq!(claims.sub, "auth|42");
        assert_eq!(claims.email.as_deref(), Some("farmer@example.com"));
    }

    #[test]
    fn rejects_missing_header() {
        assert!(matches!(
            decode_bearer(None, "secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let header = HeaderValue::from_static("Basic dXNlcjpwYXNz");
        assert!(decode_bearer(Some(&header), "secret").is_err());
    }

    #[test]
    fn rejects_wrong_secret() {
        let header = token("auth|42", Utc::now().timestamp() + 3600, "other");
        assert!(decode_bearer(Some(&header), "secret").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let header = token("auth|42", Utc::now().timestamp() - 3600, "secret");
        assert!(decode_bearer(Some(&header), "secret").is_err());
    }
}

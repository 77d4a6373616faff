/// 인증 및 역할 검사
/// 1. 세션 토큰 -> 로컬 사용자 (CurrentUser 추출기)
/// 2. 핸들러별 고정 허용 역할 목록 검사
// region:    --- Imports
use crate::app::AppState;
use crate::error::AppError;
use crate::users::commands::ensure_user;
use crate::users::model::{Role, User};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::warn;

// endregion: --- Imports

pub mod session;

// region:    --- Current User
/// 인증된 사용자
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = session::decode_bearer(
            parts.headers.get(AUTHORIZATION),
            &state.config.auth.jwt_secret,
        )?;
        let user = ensure_user(&state.db, &claims).await?;
        Ok(CurrentUser(user))
    }
}

// endregion: --- Current User

// region:    --- Role Gate
/// 허용 역할 목록 검사, 실패 시 일반 Unauthorized
pub fn require_role(user: &User, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        warn!(
            "{:<12} --> 역할 거부: user={}, role={:?}",
            "Auth", user.id, user.role
        );
        Err(AppError::Unauthorized)
    }
}

/// 리소스 소유자 또는 관리자만 허용
pub fn require_owner_or_admin(user: &User, owner_id: i64) -> Result<(), AppError> {
    if user.id == owner_id || user.role == Role::Admin {
        Ok(())
    } else {
        warn!(
            "{:<12} --> 소유자 불일치: user={}, owner={}",
            "Auth", user.id, owner_id
        );
        Err(AppError::Unauthorized)
    }
}

// endregion: --- Role Gate

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i64, role: Role) -> User {
        User {
            id,
            auth_id: format!("auth|{}", id),
            email: None,
            name: None,
            role,
            onboarding_completed: true,
            phone: None,
            location: None,
            bio: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_in_allow_list_passes() {
        assert!(require_role(&user(1, Role::Farmer), &[Role::Farmer, Role::Seller]).is_ok());
    }

    #[test]
    fn admin_is_not_implied() {
        assert!(matches!(
            require_role(&user(1, Role::Admin), &[Role::Farmer]),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn owner_or_admin() {
        assert!(require_owner_or_admin(&user(7, Role::Farmer), 7).is_ok());
        assert!(require_owner_or_admin(&user(1, Role::Admin), 7).is_ok());
        assert!(require_owner_or_admin(&user(8, Role::Seller), 7).is_err());
    }
}

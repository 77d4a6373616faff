/// 사용자 관련 커맨드 처리
/// 1. 세션 사용자 동기화
/// 2. 온보딩 완료
// region:    --- Imports
use super::model::{CompleteOnboardingInput, Role, User};
use crate::auth::session::Claims;
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::revalidate::Revalidator;
use tracing::info;
use validator::Validate;

// endregion: --- Imports

// 온보딩에서 스스로 선택 가능한 역할
const SELF_ASSIGNABLE_ROLES: [Role; 4] =
    [Role::User, Role::Farmer, Role::Seller, Role::Contractor];

// region:    --- Commands
/// 1. 세션 사용자 동기화
/// 처음 보는 auth_id 는 USER 역할로 생성, 이미 있으면 이메일만 갱신
pub async fn ensure_user(db_manager: &DatabaseManager, claims: &Claims) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (auth_id, email, name)
         VALUES ($1, $2, $3)
         ON CONFLICT (auth_id) DO UPDATE
         SET email = COALESCE(EXCLUDED.email, users.email),
             name = COALESCE(users.name, EXCLUDED.name)
         RETURNING *",
    )
    .bind(&claims.sub)
    .bind(&claims.email)
    .bind(&claims.name)
    .fetch_one(db_manager.pool())
    .await?;

    Ok(user)
}

/// 2. 온보딩 완료
pub async fn handle_complete_onboarding(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    input: CompleteOnboardingInput,
) -> AppResult<User> {
    info!(
        "{:<12} --> 온보딩 요청: user={}, role={:?}",
        "Command", user.id, input.role
    );
    input.validate()?;

    if user.onboarding_completed {
        return Err(AppError::Rejected("Onboarding already completed".into()));
    }
    if !SELF_ASSIGNABLE_ROLES.contains(&input.role) {
        return Err(AppError::Rejected("Role cannot be selected".into()));
    }

    // 동시 요청 대비: 플래그가 false 인 행만 갱신
    let updated = sqlx::query_as::<_, User>(
        "UPDATE users
         SET role = $1, name = $2, phone = $3, location = $4, bio = $5,
             onboarding_completed = TRUE, updated_at = NOW()
         WHERE id = $6 AND onboarding_completed = FALSE
         RETURNING *",
    )
    .bind(input.role)
    .bind(input.name.trim())
    .bind(&input.phone)
    .bind(&input.location)
    .bind(&input.bio)
    .bind(user.id)
    .fetch_optional(db_manager.pool())
    .await?
    .ok_or_else(|| AppError::Rejected("Onboarding already completed".into()))?;

    revalidator.revalidate_paths(&[
        "/".to_string(),
        "/onboarding".to_string(),
        updated.role.dashboard_path().to_string(),
    ]);

    info!(
        "{:<12} --> 온보딩 완료: user={}, role={:?}",
        "Command", updated.id, updated.role
    );
    Ok(updated)
}

// endregion: --- Commands

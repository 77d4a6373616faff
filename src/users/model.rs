use crate::validation::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 계정 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Farmer,
    Seller,
    Contractor,
    Admin,
}

impl Role {
    /// 대시보드 경로 조각
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::User => "/dashboard/buyer",
            Role::Farmer => "/dashboard/farmer",
            Role::Seller => "/dashboard/seller",
            Role::Contractor => "/dashboard/contractor",
            Role::Admin => "/dashboard/admin",
        }
    }
}

// 사용자 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub auth_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Role,
    pub onboarding_completed: bool,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 온보딩 완료 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteOnboardingInput {
    pub role: Role,
    #[validate(length(min = 1, max = 100), custom = "not_blank")]
    pub name: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
}

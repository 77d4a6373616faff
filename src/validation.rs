//! 입력 검증 보조 함수
use validator::ValidationError;

/// 공백만 있는 문자열 거절
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

//! 사용자 관련 요청/응답 DTO
//!
//! JSON 역직렬화와 입력 검증을 자동으로 수행합니다.
//! 검증 메시지는 기존 프론트엔드가 기대하는 문구를 그대로 유지합니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 회원가입 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// 사용자명 (공백 불가)
    #[validate(length(min = 1, message = "All fields are mandatory!"))]
    #[validate(custom(function = "validate_no_spaces"))]
    pub username: String,

    /// 이메일 주소
    #[validate(email(message = "Invalid Email Address!"))]
    pub email: String,

    /// 비밀번호
    #[validate(length(min = 1, message = "All fields are mandatory!"))]
    pub password: String,
}

/// 로그인 요청 DTO
///
/// `username` 필드에는 사용자명 또는 이메일 주소가 들어올 수 있습니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "All fields are mandatory!"))]
    pub username: String,

    #[validate(length(min = 1, message = "All fields are mandatory!"))]
    pub password: String,
}

/// Google 로그인 요청 DTO
///
/// 프론트엔드의 Google Sign-In이 돌려준 ID 토큰(credential)을 담습니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1, message = "Invalid Credential!"))]
    pub credential: String,
}

/// 사용자명 변경 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeUsernameRequest {
    #[validate(length(min = 1, message = "Please Provide a username!"))]
    #[validate(custom(function = "validate_no_spaces"))]
    pub username: String,
}

/// 이메일 변경 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeEmailRequest {
    #[validate(email(message = "Invalid Email Address!"))]
    pub email: String,
}

/// 비밀번호 재설정 메일 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReqPasswordRequest {
    /// 사용자명 또는 이메일
    #[validate(length(min = 1, message = "Please Provide a username or Email!"))]
    pub username: String,
}

/// 재설정 토큰으로 새 비밀번호를 설정하는 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Please Provide a new Password!"))]
    pub password: String,
}

/// 로그인 상태에서의 비밀번호 변경 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Please Provide both old and new Passwords!"))]
    pub old_password: String,

    #[validate(length(min = 1, message = "Please Provide both old and new Passwords!"))]
    pub new_password: String,
}

/// 사용자 검색 쿼리 파라미터
#[derive(Debug, Clone, Deserialize)]
pub struct UserSearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_user_limit")]
    pub limit: i64,
}

fn default_user_limit() -> i64 {
    10
}

/// 인증 성공 응답 (register/login/google)
///
/// refresh 토큰은 본문과 HttpOnly 쿠키 양쪽으로 전달됩니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthDetailsResponse {
    pub username: String,
    pub access: String,
    pub refresh: String,
    pub refresh_max_age: i64,
    pub id: String,
}

/// 액세스 토큰 재발급 응답
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub access: String,
    pub username: Option<String>,
    pub id: String,
}

/// 공개 사용자 프로필 응답 (비밀번호 해시 제외)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
}

impl From<crate::domain::entities::user::User> for UserResponse {
    fn from(user: crate::domain::entities::user::User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            username: user.username,
            email: user.email,
            email_verified: user.email_verified,
        }
    }
}

/// 사용자명에 공백이 없는지 검증
fn validate_no_spaces(username: &str) -> Result<(), ValidationError> {
    if username.contains(' ') {
        return Err(ValidationError::new("username_has_spaces")
            .with_message("Username Can't have spaces!".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_spaces_in_username() {
        let req = RegisterRequest {
            username: "john doe".to_string(),
            email: "john@example.com".to_string(),
            password: "pw1".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let req = RegisterRequest {
            username: "john".to_string(),
            email: "not-an-email".to_string(),
            password: "pw1".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_accepts_valid_input() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_change_password_fields_are_camel_case() {
        let req: ChangePasswordRequest = serde_json::from_value(serde_json::json!({
            "oldPassword": "old",
            "newPassword": "new",
        }))
        .unwrap();
        assert_eq!(req.old_password, "old");
        assert_eq!(req.new_password, "new");
    }
}

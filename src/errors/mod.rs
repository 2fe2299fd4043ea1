//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다. 모든 에러는 경계(핸들러)에서 잡혀
//! `{title, error, stackTrace}` 형태의 JSON 응답으로 렌더링됩니다.
//!
//! ## 상태 코드 매핑
//!
//! | 에러 | HTTP 상태 |
//! |------|-----------|
//! | `ValidationError` | 400 Bad Request |
//! | `DuplicateField` / `Conflict` | 400 Bad Request (이 시스템의 관례) |
//! | `Unauthorized` | 401 Unauthorized |
//! | `NotFound` | 404 Not Found |
//! | 그 외 | 500 Internal Server Error |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn add_snippet(files: &[SnippetFile]) -> Result<(), AppError> {
//!     if files.is_empty() {
//!         return Err(AppError::ValidationError("Please Provide Code File".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("{0}")]
    ValidationError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("{0}")]
    Unauthorized(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("{0}")]
    NotFound(String),

    /// 유니크 인덱스 위반 에러 (400 Bad Request)
    ///
    /// 위반된 필드명을 담습니다. 메시지는 원본 필드명을 첫 글자만
    /// 대문자로 바꿔 렌더링합니다 (예: "Username already exists.").
    #[error("{} already exists.", crate::utils::string_utils::capitalize_first_letter(.0))]
    DuplicateField(String),

    /// 중복 외의 비즈니스 충돌 에러 (400 Bad Request)
    #[error("{0}")]
    Conflict(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::DuplicateField(_)
            | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 응답 JSON의 `title` 필드 값
    ///
    /// 원본 API와 동일한 표기(대문자, 공백 구분)를 유지합니다.
    pub fn title(&self) -> &'static str {
        match self.status() {
            StatusCode::BAD_REQUEST => "VALIDATION ERROR",
            StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
            StatusCode::NOT_FOUND => "NOT FOUND",
            _ => "SERVER ERROR",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러는 `{title, error, stackTrace}` 형태로 통일하여 렌더링합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status()).json(serde_json::json!({
            "title": self.title(),
            "error": self.to_string(),
            "stackTrace": format!("{:?}", self),
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::ValidationError("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DuplicateField("username".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DatabaseError("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_field_message_names_field() {
        let err = AppError::DuplicateField("username".to_string());
        assert_eq!(err.to_string(), "Username already exists.");

        let err = AppError::DuplicateField("email".to_string());
        assert_eq!(err.to_string(), "Email already exists.");
    }

    #[test]
    fn test_title_matches_status() {
        assert_eq!(AppError::ValidationError("x".into()).title(), "VALIDATION ERROR");
        assert_eq!(AppError::Unauthorized("x".into()).title(), "UNAUTHORIZED");
        assert_eq!(AppError::NotFound("x".into()).title(), "NOT FOUND");
        assert_eq!(AppError::InternalError("x".into()).title(), "SERVER ERROR");
    }
}

//! 데이터 액세스 계층 모듈
//!
//! MongoDB 컬렉션에 대한 CRUD 연산을 담당하는 리포지토리들을 제공합니다.
//! 유니크 제약 위반(E11000)은 위반 필드명을 추출해
//! `AppError::DuplicateField`로 표면화합니다.

pub mod snippets;
pub mod users;

use mongodb::error::{ErrorKind, WriteFailure};

use crate::errors::AppError;

/// MongoDB 쓰기 에러를 AppError로 변환
///
/// E11000 중복 키 에러는 에러 메시지에서 위반된 인덱스 필드명을 추출해
/// `DuplicateField`로 변환하고, 그 외에는 `DatabaseError`로 수렴시킵니다.
///
/// 중복 키는 경로에 따라 두 가지 형태로 돌아옵니다. `insert_one`은
/// `WriteFailure::WriteError`로, `find_one_and_update`(findAndModify)는
/// `ErrorKind::Command`로 보고하므로 양쪽 모두 처리합니다.
pub(crate) fn map_write_error(err: mongodb::error::Error) -> AppError {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000 => {
            duplicate_from_message(&write_error.message)
        }
        ErrorKind::Command(command_error) if command_error.code == 11000 => {
            duplicate_from_message(&command_error.message)
        }
        _ => AppError::DatabaseError(err.to_string()),
    }
}

/// E11000 메시지를 `DuplicateField`로 변환 (필드명 추출 실패 시 일반 명칭)
fn duplicate_from_message(message: &str) -> AppError {
    AppError::DuplicateField(
        extract_duplicate_field(message).unwrap_or_else(|| "field".to_string()),
    )
}

/// E11000 에러 메시지에서 위반 필드명 추출
///
/// 메시지 형식 예:
/// `E11000 duplicate key error collection: db.users index: username_1 dup key: { username: "x" }`
pub(crate) fn extract_duplicate_field(message: &str) -> Option<String> {
    // "index: <name>_<direction>" 토큰에서 필드명을 뽑는다
    if let Some(rest) = message.split("index: ").nth(1) {
        let index_name = rest.split_whitespace().next()?;
        if let Some((field, _direction)) = index_name.rsplit_once('_') {
            if !field.is_empty() {
                return Some(field.to_string());
            }
        }
        return Some(index_name.to_string());
    }

    // 구버전 서버의 "dup key: { username: ... }" 형식 폴백
    if let Some(rest) = message.split("dup key: {").nth(1) {
        let field = rest.trim_start().split(':').next()?.trim();
        if !field.is_empty() && !field.starts_with('}') {
            return Some(field.trim_matches('"').to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_duplicate_field_from_index_name() {
        let msg = "E11000 duplicate key error collection: snippet_share.users \
                   index: username_1 dup key: { username: \"alice\" }";
        assert_eq!(extract_duplicate_field(msg), Some("username".to_string()));

        let msg = "E11000 duplicate key error collection: snippet_share.users \
                   index: email_1 dup key: { email: \"a@x.com\" }";
        assert_eq!(extract_duplicate_field(msg), Some("email".to_string()));
    }

    #[test]
    fn test_extract_duplicate_field_fallback_dup_key() {
        let msg = "E11000 duplicate key error dup key: { username: \"alice\" }";
        assert_eq!(extract_duplicate_field(msg), Some("username".to_string()));
    }

    #[test]
    fn test_extract_duplicate_field_unknown_format() {
        assert_eq!(extract_duplicate_field("some unrelated error"), None);
    }

    #[test]
    fn test_map_write_error_insert_duplicate() {
        let write_error: mongodb::error::WriteError = mongodb::bson::from_document(
            mongodb::bson::doc! {
                "code": 11000,
                "codeName": "DuplicateKey",
                "errmsg": "E11000 duplicate key error collection: snippet_share.users \
                           index: email_1 dup key: { email: \"a@x.com\" }",
            },
        )
        .unwrap();
        let err = mongodb::error::Error::from(ErrorKind::Write(WriteFailure::WriteError(
            write_error,
        )));

        match map_write_error(err) {
            AppError::DuplicateField(field) => assert_eq!(field, "email"),
            other => panic!("expected DuplicateField, got {:?}", other),
        }
    }

    #[test]
    fn test_map_write_error_find_and_modify_duplicate() {
        // findAndModify는 WriteError가 아니라 Command 에러로 보고한다
        let command_error: mongodb::error::CommandError = mongodb::bson::from_document(
            mongodb::bson::doc! {
                "code": 11000,
                "codeName": "DuplicateKey",
                "errmsg": "E11000 duplicate key error collection: snippet_share.users \
                           index: username_1 dup key: { username: \"alice\" }",
            },
        )
        .unwrap();
        let err = mongodb::error::Error::from(ErrorKind::Command(command_error));

        match map_write_error(err) {
            AppError::DuplicateField(field) => assert_eq!(field, "username"),
            other => panic!("expected DuplicateField, got {:?}", other),
        }
    }

    #[test]
    fn test_map_write_error_other_errors_are_database_errors() {
        let command_error: mongodb::error::CommandError = mongodb::bson::from_document(
            mongodb::bson::doc! {
                "code": 2,
                "codeName": "BadValue",
                "errmsg": "unknown operator",
            },
        )
        .unwrap();
        let err = mongodb::error::Error::from(ErrorKind::Command(command_error));

        assert!(matches!(map_write_error(err), AppError::DatabaseError(_)));
    }
}

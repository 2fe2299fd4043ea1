//! HTTP 요청 핸들러 모듈
pub mod snippets;
pub mod users;

use validator::ValidationErrors;

/// 검증 실패에서 사용자에게 보여줄 첫 번째 메시지를 추출합니다.
///
/// 프론트엔드는 필드별 에러 맵이 아니라 단일 문구를 기대하므로
/// 가장 먼저 발견된 메시지 하나만 돌려줍니다.
pub(crate) fn validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "All fields are mandatory!".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Please Provide a username!"))]
        username: String,
    }

    #[test]
    fn test_validation_message_uses_declared_message() {
        let sample = Sample {
            username: String::new(),
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(validation_message(&errors), "Please Provide a username!");
    }
}

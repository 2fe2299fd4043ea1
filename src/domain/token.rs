//! JWT 토큰 도메인 모델
//!
//! 토큰 용도(purpose), 클레임, 검증 결과 타입을 정의합니다.
//! 용도마다 별도의 서명 시크릿과 만료 시간을 가지며,
//! 한 용도로 발급된 토큰은 다른 용도의 시크릿으로 절대 검증되지 않습니다.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// 토큰 용도
///
/// 용도별 시크릿 선택과 만료 시간 결정에 사용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// API 호출을 승인하는 단명 토큰 (3분)
    Access,
    /// 액세스 토큰 재발급용 장명 토큰 (7일)
    Refresh,
    /// 로그인 없이 비밀번호 변경을 승인하는 토큰 (30분)
    Reset,
    /// 이메일 인증 확인용 토큰 (30분)
    Verify,
}

impl TokenPurpose {
    /// 용도별 만료 시간
    pub fn expiry(&self) -> Duration {
        match self {
            TokenPurpose::Access => Duration::minutes(3),
            TokenPurpose::Refresh => Duration::days(7),
            TokenPurpose::Reset => Duration::minutes(30),
            TokenPurpose::Verify => Duration::minutes(30),
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenPurpose::Access => "access",
            TokenPurpose::Refresh => "refresh",
            TokenPurpose::Reset => "reset",
            TokenPurpose::Verify => "verify",
        };
        f.write_str(s)
    }
}

/// JWT 클레임
///
/// `sub`에는 사용자 ObjectId의 16진수 문자열이 들어갑니다.
/// refresh 토큰에는 `username`이 추가로 실립니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID (ObjectId hex)
    pub sub: String,
    /// 사용자명 (refresh 토큰에만 포함)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// 발급 시각 (unix timestamp)
    pub iat: i64,
    /// 만료 시각 (unix timestamp)
    pub exp: i64,
}

/// 토큰 검증 결과
///
/// 만료, 서명 불일치, 형식 오류, 시크릿 불일치 등 모든 실패 원인을
/// `Invalid` 하나로 수렴시킵니다. 호출자에게 어떤 검사가 실패했는지
/// 노출하지 않기 위한 의도적인 설계입니다.
#[derive(Debug, Clone)]
pub enum TokenVerification {
    /// 검증 성공, 클레임 포함
    Verified(TokenClaims),
    /// 검증 실패 (원인 비공개)
    Invalid,
}

impl TokenVerification {
    /// 검증된 클레임으로 변환, 실패 시 None
    pub fn ok(self) -> Option<TokenClaims> {
        match self {
            TokenVerification::Verified(claims) => Some(claims),
            TokenVerification::Invalid => None,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, TokenVerification::Verified(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_expiry_table() {
        assert_eq!(TokenPurpose::Access.expiry(), Duration::minutes(3));
        assert_eq!(TokenPurpose::Refresh.expiry(), Duration::days(7));
        assert_eq!(TokenPurpose::Reset.expiry(), Duration::minutes(30));
        assert_eq!(TokenPurpose::Verify.expiry(), Duration::minutes(30));
    }

    #[test]
    fn test_verification_ok() {
        let claims = TokenClaims {
            sub: "507f1f77bcf86cd799439011".to_string(),
            username: None,
            iat: 0,
            exp: 0,
        };
        assert!(TokenVerification::Verified(claims).ok().is_some());
        assert!(TokenVerification::Invalid.ok().is_none());
    }
}

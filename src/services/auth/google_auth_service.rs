//! # Google 소셜 로그인 검증 서비스
//!
//! 프론트엔드의 Google Sign-In이 돌려준 ID 토큰(credential)을
//! Google tokeninfo 엔드포인트로 검증합니다. 서명 검증은 Google이
//! 수행하며, 이 서비스는 audience(우리 Client ID) 일치 여부만
//! 추가로 확인합니다.

use serde::{Deserialize, Deserializer};

use crate::config::GoogleOAuthConfig;
use crate::errors::AppError;

/// Google tokeninfo 엔드포인트
const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// tokeninfo 응답 중 사용되는 필드
///
/// `email_verified`는 Google이 문자열("true")로 내려주는 경우가 있어
/// 불리언/문자열 양쪽을 허용합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// 토큰의 audience (우리 Client ID여야 함)
    pub aud: String,
    /// 사용자 표시 이름
    pub name: String,
    /// 사용자 이메일
    pub email: String,
    /// 이메일 인증 여부
    #[serde(deserialize_with = "bool_from_string_or_bool", default)]
    pub email_verified: bool,
}

fn bool_from_string_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    Ok(match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => b,
        BoolOrString::Str(s) => s == "true",
    })
}

/// Google ID 토큰 검증 서비스
pub struct GoogleAuthService {
    http: reqwest::Client,
    config: GoogleOAuthConfig,
}

impl GoogleAuthService {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// ID 토큰(credential)을 검증하고 사용자 정보를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 토큰이 유효하지 않거나 audience 불일치
    /// * `AppError::ExternalServiceError` - Google API 호출 실패
    pub async fn verify_credential(&self, credential: &str) -> Result<GoogleUserInfo, AppError> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::ValidationError("Invalid Credential!".to_string()));
        }

        let info: GoogleUserInfo = response
            .json()
            .await
            .map_err(|_| AppError::ValidationError("Invalid Credential!".to_string()))?;

        if info.aud != self.config.client_id {
            log::warn!("Google credential audience 불일치: {}", info.aud);
            return Err(AppError::ValidationError("Invalid Credential!".to_string()));
        }

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_verified_accepts_string_and_bool() {
        let info: GoogleUserInfo = serde_json::from_value(serde_json::json!({
            "aud": "client-id",
            "name": "John Doe",
            "email": "john@example.com",
            "email_verified": "true",
        }))
        .unwrap();
        assert!(info.email_verified);

        let info: GoogleUserInfo = serde_json::from_value(serde_json::json!({
            "aud": "client-id",
            "name": "John Doe",
            "email": "john@example.com",
            "email_verified": false,
        }))
        .unwrap();
        assert!(!info.email_verified);
    }

    #[test]
    fn test_email_verified_defaults_to_false() {
        let info: GoogleUserInfo = serde_json::from_value(serde_json::json!({
            "aud": "client-id",
            "name": "John Doe",
            "email": "john@example.com",
        }))
        .unwrap();
        assert!(!info.email_verified);
    }
}

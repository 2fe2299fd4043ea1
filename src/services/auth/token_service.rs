//! JWT 토큰 관리 서비스 구현
//!
//! 용도별(access/refresh/reset/verify) 시크릿으로 서명된 JWT 토큰의
//! 발급과 검증을 담당합니다. HMAC-SHA256 서명을 사용합니다.
//!
//! 검증은 예외를 던지지 않습니다. 만료, 서명 불일치, 형식 오류,
//! 용도 불일치 등 모든 실패는 `TokenVerification::Invalid` 하나로
//! 수렴되며, 어떤 검사가 실패했는지는 호출자에게 노출되지 않습니다.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::token::{TokenClaims, TokenPurpose, TokenVerification};
use crate::errors::AppError;

/// JWT 토큰 관리 서비스
///
/// 기동 시 구성된 `JwtConfig`를 소유하며, 호출 시점에 환경을 읽지 않습니다.
pub struct TokenService {
    jwt: JwtConfig,
}

impl TokenService {
    pub fn new(jwt: JwtConfig) -> Self {
        Self { jwt }
    }

    /// 용도별 토큰 발급
    ///
    /// # Arguments
    ///
    /// * `purpose` - 토큰 용도 (시크릿과 만료 시간 결정)
    /// * `subject_id` - 사용자 ID (ObjectId hex)
    /// * `username` - refresh 토큰에만 실리는 부가 클레임
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    pub fn issue(
        &self,
        purpose: TokenPurpose,
        subject_id: &str,
        username: Option<&str>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + purpose.expiry();

        let claims = TokenClaims {
            sub: subject_id.to_string(),
            username: username.map(|u| u.to_string()),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = self.jwt.secret(purpose);
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰 검증
    ///
    /// 주어진 용도의 시크릿으로 토큰을 검증합니다.
    /// 다른 용도로 발급된 토큰은 서명 불일치로 `Invalid`가 됩니다.
    pub fn verify(&self, token: &str, purpose: TokenPurpose) -> TokenVerification {
        let secret = self.jwt.secret(purpose);
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        match decode::<TokenClaims>(token, &decoding_key, &validation) {
            Ok(token_data) => TokenVerification::Verified(token_data.claims),
            Err(_) => TokenVerification::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(JwtConfig::new(
            "access-secret",
            "refresh-secret",
            "reset-secret",
            "verify-secret",
        ))
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let svc = service();
        let subject = "507f1f77bcf86cd799439011";

        for purpose in [
            TokenPurpose::Access,
            TokenPurpose::Refresh,
            TokenPurpose::Reset,
            TokenPurpose::Verify,
        ] {
            let token = svc.issue(purpose, subject, None).unwrap();
            let claims = svc.verify(&token, purpose).ok().unwrap();
            assert_eq!(claims.sub, subject);
        }
    }

    #[test]
    fn test_cross_purpose_verification_fails() {
        let svc = service();
        let subject = "507f1f77bcf86cd799439011";
        let purposes = [
            TokenPurpose::Access,
            TokenPurpose::Refresh,
            TokenPurpose::Reset,
            TokenPurpose::Verify,
        ];

        for issued_as in purposes {
            let token = svc.issue(issued_as, subject, None).unwrap();
            for verified_as in purposes {
                if issued_as == verified_as {
                    continue;
                }
                assert!(
                    !svc.verify(&token, verified_as).is_verified(),
                    "{} 토큰이 {} 시크릿으로 검증됨",
                    issued_as,
                    verified_as
                );
            }
        }
    }

    #[test]
    fn test_refresh_token_carries_username() {
        let svc = service();
        let token = svc
            .issue(TokenPurpose::Refresh, "507f1f77bcf86cd799439011", Some("alice"))
            .unwrap();
        let claims = svc.verify(&token, TokenPurpose::Refresh).ok().unwrap();
        assert_eq!(claims.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        let svc = service();
        assert!(!svc.verify("not-a-jwt", TokenPurpose::Access).is_verified());
        assert!(!svc.verify("", TokenPurpose::Access).is_verified());
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let svc = service();
        // 기본 검증 leeway(60초)를 넘긴 과거 만료 시각으로 직접 서명
        let claims = TokenClaims {
            sub: "507f1f77bcf86cd799439011".to_string(),
            username: None,
            iat: Utc::now().timestamp() - 600,
            exp: Utc::now().timestamp() - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("access-secret".as_ref()),
        )
        .unwrap();

        assert!(!svc.verify(&token, TokenPurpose::Access).is_verified());
    }
}

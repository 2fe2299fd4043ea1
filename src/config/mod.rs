//! # 애플리케이션 설정 모듈
//!
//! JWT 시크릿, Google OAuth, 메일 발송, 서버 설정을 관리하는 모듈입니다.
//! 모든 설정은 기동 시점에 환경변수에서 **한 번만** 읽어 `AppConfig`로
//! 구성하고, 이후에는 참조로만 전달됩니다. 호출 시점에 환경을 읽는
//! 코드는 없습니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! # JWT 용도별 시크릿 (서로 달라야 교차 재사용이 차단됨)
//! export JWT_ACCESS_SECRET="..."
//! export JWT_REFRESH_SECRET="..."
//! export JWT_RESET_SECRET="..."
//! export JWT_VERIFY_SECRET="..."
//!
//! # Google OAuth
//! export GOOGLE_CLIENT_ID="123456789-xxxx.apps.googleusercontent.com"
//!
//! # 메일 발송 (Gmail SMTP)
//! export GMAIL_ID="service@gmail.com"
//! export GMAIL_PASSWORD="app password"
//! export RESET_PASSWORD_LINK="https://ui.example.com/reset/"
//! export VERIFY_EMAIL_LINK="https://ui.example.com/verify/"
//! ```
//!
//! ## 선택 환경 변수
//!
//! - `MONGODB_URI` — 연결 URI (기본값: mongodb://localhost:27017)
//! - `DATABASE_NAME` — 데이터베이스 이름 (기본값: snippet_share)
//! - `UI_URL` — CORS 허용 오리진 (기본값: http://localhost:3000)
//! - `PORT` — 바인드 포트 (기본값: 5000)
//! - `IN_PRODUCTION` — refresh 쿠키 Secure 플래그

use std::env;

use thiserror::Error;

use crate::domain::token::TokenPurpose;

/// 설정 로딩 실패 에러
///
/// 필수 환경 변수가 누락된 경우 기동을 중단시킵니다.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 토큰 용도에 대한 시크릿이 설정되지 않음
    #[error("no secret configured for token purpose `{0}`")]
    MissingSecret(&'static str),

    /// 필수 환경 변수 누락
    #[error("environment variable `{0}` must be set")]
    MissingVar(&'static str),
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

/// JWT 용도별 시크릿 설정
///
/// 토큰 용도(access/refresh/reset/verify)마다 별도의 서명 키를 둡니다.
/// 유출된 reset 토큰이 access 토큰으로 재사용되는 것을 막는 핵심 장치입니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    access_secret: String,
    refresh_secret: String,
    reset_secret: String,
    verify_secret: String,
}

impl JwtConfig {
    /// 환경 변수에서 JWT 설정을 구성합니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::MissingSecret` - 용도별 시크릿이 하나라도 누락된 경우
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            access_secret: env::var("JWT_ACCESS_SECRET")
                .map_err(|_| ConfigError::MissingSecret("access"))?,
            refresh_secret: env::var("JWT_REFRESH_SECRET")
                .map_err(|_| ConfigError::MissingSecret("refresh"))?,
            reset_secret: env::var("JWT_RESET_SECRET")
                .map_err(|_| ConfigError::MissingSecret("reset"))?,
            verify_secret: env::var("JWT_VERIFY_SECRET")
                .map_err(|_| ConfigError::MissingSecret("verify"))?,
        })
    }

    /// 테스트 및 임베드 용도의 직접 생성자
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        reset_secret: impl Into<String>,
        verify_secret: impl Into<String>,
    ) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            reset_secret: reset_secret.into(),
            verify_secret: verify_secret.into(),
        }
    }

    /// 용도에 대응하는 서명 시크릿
    pub fn secret(&self, purpose: TokenPurpose) -> &str {
        match purpose {
            TokenPurpose::Access => &self.access_secret,
            TokenPurpose::Refresh => &self.refresh_secret,
            TokenPurpose::Reset => &self.reset_secret,
            TokenPurpose::Verify => &self.verify_secret,
        }
    }
}

/// Google OAuth 2.0 설정
///
/// 프론트엔드가 Google 로그인으로 받아온 ID 토큰(credential)을
/// 서버에서 검증할 때 audience 확인에 사용됩니다.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    /// Google Cloud Console에서 발급한 OAuth 2.0 Client ID
    pub client_id: String,
}

impl GoogleOAuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: required("GOOGLE_CLIENT_ID")?,
        })
    }
}

/// 메일 발송 설정 (Gmail SMTP)
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// 발신 계정 (SMTP 로그인 ID 겸 From 주소)
    pub gmail_id: String,
    /// SMTP 앱 비밀번호
    pub gmail_password: String,
    /// 비밀번호 재설정 링크 베이스 URL (뒤에 reset 토큰이 붙음)
    pub reset_password_link: String,
    /// 이메일 인증 링크 베이스 URL (뒤에 verify 토큰이 붙음)
    pub verify_email_link: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            gmail_id: required("GMAIL_ID")?,
            gmail_password: required("GMAIL_PASSWORD")?,
            reset_password_link: required("RESET_PASSWORD_LINK")?,
            verify_email_link: required("VERIFY_EMAIL_LINK")?,
        })
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// 연결 URI
    pub mongodb_uri: String,
    /// 데이터베이스 이름
    pub database_name: String,
}

impl DbConfig {
    pub fn from_env() -> Self {
        let mongodb_uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database_name =
            env::var("DATABASE_NAME").unwrap_or_else(|_| "snippet_share".to_string());

        Self {
            mongodb_uri,
            database_name,
        }
    }
}

/// HTTP 서버 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인드 포트
    pub port: u16,
    /// CORS 허용 오리진 (프론트엔드 URL)
    pub ui_url: String,
    /// 운영 환경 여부 (refresh 쿠키 Secure 플래그)
    pub in_production: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);

        let ui_url = env::var("UI_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let in_production = env::var("IN_PRODUCTION")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            port,
            ui_url,
            in_production,
        }
    }
}

/// 애플리케이션 전체 설정
///
/// 기동 시 한 번 구성되어 `web::Data`로 공유되는 읽기 전용 설정입니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub google: GoogleOAuthConfig,
    pub mail: MailConfig,
    pub db: DbConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// 전체 설정을 환경 변수에서 구성합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            google: GoogleOAuthConfig::from_env()?,
            mail: MailConfig::from_env()?,
            db: DbConfig::from_env(),
            server: ServerConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_config_defaults() {
        env::remove_var("MONGODB_URI");
        env::remove_var("DATABASE_NAME");

        let db = DbConfig::from_env();
        assert_eq!(db.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(db.database_name, "snippet_share");
    }

    #[test]
    fn test_secret_is_purpose_scoped() {
        let jwt = JwtConfig::new("a", "b", "c", "d");
        assert_eq!(jwt.secret(TokenPurpose::Access), "a");
        assert_eq!(jwt.secret(TokenPurpose::Refresh), "b");
        assert_eq!(jwt.secret(TokenPurpose::Reset), "c");
        assert_eq!(jwt.secret(TokenPurpose::Verify), "d");
    }
}

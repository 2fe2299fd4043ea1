//! 인증 관련 서비스 모듈

pub mod google_auth_service;
pub mod token_service;

pub use google_auth_service::GoogleAuthService;
pub use token_service::TokenService;

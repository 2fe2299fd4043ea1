//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 도메인별로 모듈화되어 토큰 발급/검증, 사용자 관리, 스니펫 관리,
//! 메일 발송을 담당합니다. 모든 서비스는 기동 시 한 번 생성되어
//! 앱 상태를 통해 참조로 공유됩니다.

pub mod auth;
pub mod mail;
pub mod snippets;
pub mod users;

//! 스니펫 공유 서비스 백엔드
//!
//! 코드 스니펫 공유 사이트를 위한 Rust 기반 백엔드입니다.
//! JWT 토큰 기반 인증, Google 소셜 로그인, 스니펫 CRUD와 검색을 제공합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 회원가입, 로그인, 사용자명/이메일/비밀번호 변경
//! - **JWT 인증**: 용도별 시크릿(access/refresh/reset/verify)의 상태 없는 인증
//! - **소셜 로그인**: Google Sign-In credential 검증과 자동 가입
//! - **스니펫**: 다중 파일 스니펫 저장, 제목/언어 검색, 소유자 스코프 수정/삭제
//! - **이메일**: 비밀번호 재설정 링크와 이메일 인증 링크 발송
//! - **MongoDB**: 유니크 인덱스로 사용자명/이메일 유일성 강제
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! 모든 서비스는 기동 시 [`state::AppState`]로 한 번 구성되어
//! `web::Data`로 핸들러에 공유됩니다.

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

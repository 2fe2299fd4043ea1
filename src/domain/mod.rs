//! 도메인 계층 모듈
//!
//! 엔티티(영속 모델), 토큰 모델, 요청/응답 DTO를 제공합니다.

pub mod dto;
pub mod entities;
pub mod token;

//! 요청/응답 DTO 모듈
//!
//! 모든 입력은 엔드포인트별 타입 구조체로 디코드되며,
//! 누락/형식 오류는 `ValidationError`로 닫힌 채 실패합니다.

pub mod snippets;
pub mod users;

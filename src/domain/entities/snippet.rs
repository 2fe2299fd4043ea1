//! Snippet Entity Implementation
//!
//! 코드 스니펫 엔티티입니다. 한 스니펫은 하나 이상의 파일로 구성되며,
//! 소유자(`user`)는 약한 참조입니다. 소유권 검증은 별도의 권한 검사가
//! 아니라 `{_id, user}` 스코프 쿼리로 수행됩니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 스니펫을 구성하는 단일 코드 파일
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetFile {
    /// 코드 본문
    #[serde(default)]
    pub content: String,
    /// 코드 언어 태그 (필수)
    pub language: String,
}

/// 코드 스니펫 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유 사용자 (약한 참조)
    pub user: ObjectId,
    /// 제목 (기본값 "Untitled")
    #[serde(default = "default_title")]
    pub title: String,
    /// 파일 목록 (최소 1개)
    pub files: Vec<SnippetFile>,
}

fn default_title() -> String {
    "Untitled".to_string()
}

impl Snippet {
    pub fn new(user: ObjectId, title: Option<String>, files: Vec<SnippetFile>) -> Self {
        Self {
            id: None,
            user,
            title: title.unwrap_or_else(default_title),
            files,
        }
    }
}

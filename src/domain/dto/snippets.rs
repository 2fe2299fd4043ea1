//! 스니펫 관련 요청/응답 DTO

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::snippet::{Snippet, SnippetFile};

/// 스니펫 파일 입력
///
/// `language` 누락 검증은 역직렬화가 아니라 서비스 계층에서 수행해
/// "Please Provide Language of Code" 메시지로 실패하도록 합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetFileInput {
    #[serde(default)]
    pub content: String,
    pub language: Option<String>,
}

/// 스니펫 등록 요청 DTO
#[derive(Debug, Clone, Deserialize)]
pub struct AddSnippetRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub files: Vec<SnippetFileInput>,
}

/// 스니펫 수정 요청 DTO
///
/// 제목과 파일 목록을 통째로 교체합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSnippetRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: Option<String>,
    #[serde(default)]
    pub files: Vec<SnippetFileInput>,
}

/// 스니펫 삭제 요청 DTO
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteSnippetRequest {
    #[serde(alias = "_id")]
    pub id: String,
}

/// 스니펫 검색 쿼리 파라미터
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetSearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_snippet_limit")]
    pub limit: i64,
}

fn default_snippet_limit() -> i64 {
    12
}

/// 목록 조회용 스니펫 요약 (파일 본문 제외 프로젝션)
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub files: Vec<FileLanguage>,
    pub user: Option<ObjectId>,
}

/// 요약 프로젝션에서의 파일 항목 (언어만)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLanguage {
    pub language: Option<String>,
}

/// 스니펫 요약 응답
#[derive(Debug, Clone, Serialize)]
pub struct SnippetSummaryResponse {
    pub id: String,
    pub title: String,
    pub files: Vec<FileLanguage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl From<SnippetSummary> for SnippetSummaryResponse {
    fn from(summary: SnippetSummary) -> Self {
        Self {
            id: summary.id.to_hex(),
            title: summary.title,
            files: summary.files,
            user: summary.user.map(|u| u.to_hex()),
        }
    }
}

/// 단건 스니펫 응답 (파일 본문 포함)
#[derive(Debug, Clone, Serialize)]
pub struct SnippetResponse {
    pub id: String,
    pub user: String,
    pub title: String,
    pub files: Vec<SnippetFile>,
}

impl From<Snippet> for SnippetResponse {
    fn from(snippet: Snippet) -> Self {
        Self {
            id: snippet.id.map(|id| id.to_hex()).unwrap_or_default(),
            user: snippet.user.to_hex(),
            title: snippet.title,
            files: snippet.files,
        }
    }
}

/// 스니펫 저장 성공 응답
#[derive(Debug, Clone, Serialize)]
pub struct AddSnippetResponse {
    pub message: String,
    pub id: String,
    pub user: String,
}

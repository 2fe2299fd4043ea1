//! # 스니펫 관리 서비스 구현
//!
//! 스니펫 CRUD와 검색의 비즈니스 규칙을 담당합니다.
//! 파일 목록 검증(최소 1개, 언어 태그 필수)은 여기서 수행되고,
//! 소유권 검증은 리포지토리의 `{_id, user}` 스코프 쿼리에 맡깁니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::domain::dto::snippets::{SnippetFileInput, SnippetSummary};
use crate::domain::entities::snippet::{Snippet, SnippetFile};
use crate::errors::AppError;
use crate::repositories::snippets::SnippetRepository;

/// 파일 입력 검증
///
/// # Errors
///
/// * 빈 목록 - "Please Provide Code File"
/// * 언어 태그 누락 - "Please Provide Language of Code"
fn validate_files(files: Vec<SnippetFileInput>) -> Result<Vec<SnippetFile>, AppError> {
    if files.is_empty() {
        return Err(AppError::ValidationError(
            "Please Provide Code File".to_string(),
        ));
    }

    files
        .into_iter()
        .map(|file| {
            let language = file
                .language
                .filter(|l| !l.trim().is_empty())
                .ok_or_else(|| {
                    AppError::ValidationError("Please Provide Language of Code".to_string())
                })?;

            Ok(SnippetFile {
                content: file.content,
                language,
            })
        })
        .collect()
}

/// 스니펫 관리 비즈니스 로직 서비스
pub struct SnippetService {
    snippet_repo: Arc<SnippetRepository>,
}

impl SnippetService {
    pub fn new(snippet_repo: Arc<SnippetRepository>) -> Self {
        Self { snippet_repo }
    }

    /// 새 스니펫 등록, 생성된 ID 반환
    pub async fn add(
        &self,
        owner: ObjectId,
        title: Option<String>,
        files: Vec<SnippetFileInput>,
    ) -> Result<ObjectId, AppError> {
        let files = validate_files(files)?;
        let snippet = Snippet::new(owner, title, files);
        self.snippet_repo.insert(snippet).await
    }

    /// 단건 조회 (파일 본문 포함)
    ///
    /// 잘못된 형식의 ID와 존재하지 않는 ID 모두 "Invalid Id"로 실패합니다.
    pub async fn get(&self, id: &str) -> Result<Snippet, AppError> {
        self.snippet_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ValidationError("Invalid Id".to_string()))
    }

    /// 제목/언어 부분 일치 검색 (소유자 범위 선택)
    pub async fn search(
        &self,
        query: &str,
        offset: u64,
        limit: i64,
        owner: Option<ObjectId>,
    ) -> Result<Vec<SnippetSummary>, AppError> {
        self.snippet_repo.search(query, offset, limit, owner).await
    }

    /// 전체 교체 수정 (소유자 일치 필수)
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - id/소유자 불일치 (조용한 no-op이 아님)
    pub async fn update(
        &self,
        id: &str,
        owner: ObjectId,
        title: Option<String>,
        files: Vec<SnippetFileInput>,
    ) -> Result<(), AppError> {
        let files = validate_files(files)?;
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid Id".to_string()))?;

        let title = title.unwrap_or_else(|| "Untitled".to_string());

        let matched = self
            .snippet_repo
            .replace_owned(object_id, owner, &title, &files)
            .await?;

        if !matched {
            return Err(AppError::ValidationError("Snippet Not Found".to_string()));
        }

        Ok(())
    }

    /// 소유자 스코프 삭제, 삭제 건수(0 또는 1) 반환
    ///
    /// 삭제 대상이 없어도 에러가 아니라 0을 반환합니다.
    pub async fn delete(&self, id: &str, owner: ObjectId) -> Result<u64, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid Id".to_string()))?;

        self.snippet_repo.delete_owned(object_id, owner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_files_rejects_empty_list() {
        let err = validate_files(vec![]).unwrap_err();
        assert_eq!(err.to_string(), "Please Provide Code File");
    }

    #[test]
    fn test_validate_files_rejects_missing_language() {
        let files = vec![SnippetFileInput {
            content: "print(1)".to_string(),
            language: None,
        }];
        let err = validate_files(files).unwrap_err();
        assert_eq!(err.to_string(), "Please Provide Language of Code");

        let files = vec![SnippetFileInput {
            content: "print(1)".to_string(),
            language: Some("   ".to_string()),
        }];
        assert!(validate_files(files).is_err());
    }

    #[test]
    fn test_validate_files_accepts_valid_input() {
        let files = vec![
            SnippetFileInput {
                content: "print(1)".to_string(),
                language: Some("python".to_string()),
            },
            SnippetFileInput {
                content: String::new(),
                language: Some("rust".to_string()),
            },
        ];
        let validated = validate_files(files).unwrap();
        assert_eq!(validated.len(), 2);
        assert_eq!(validated[0].language, "python");
    }
}

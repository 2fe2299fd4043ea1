//! # 스니펫 리포지토리 구현
//!
//! `snippets` 컬렉션에 대한 CRUD와 검색을 제공합니다.
//!
//! 수정/삭제는 `{_id, user}` 양쪽을 모두 만족하는 문서만 대상으로
//! 하는 스코프 쿼리로 수행됩니다. 소유자 불일치는 매칭 0건으로
//! 나타나며, 별도의 권한 검사 단계는 없습니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use mongodb::Collection;

use crate::db::Database;
use crate::domain::dto::snippets::SnippetSummary;
use crate::domain::entities::snippet::{Snippet, SnippetFile};
use crate::errors::AppError;

/// 목록 조회 시 파일 본문을 제외하는 프로젝션
///
/// 소유자 필드는 사용자별 목록에서만 내려갑니다. 전체 검색 응답에는
/// 포함되지 않습니다.
fn summary_projection(include_owner: bool) -> Document {
    let mut projection = doc! { "_id": 1, "title": 1, "files.language": 1 };
    if include_owner {
        projection.insert("user", 1);
    }
    projection
}

/// 스니펫 데이터 액세스 리포지토리
pub struct SnippetRepository {
    db: Arc<Database>,
}

impl SnippetRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Snippet> {
        self.db.get_database().collection::<Snippet>("snippets")
    }

    fn summary_collection(&self) -> Collection<SnippetSummary> {
        self.db
            .get_database()
            .collection::<SnippetSummary>("snippets")
    }

    /// 새 스니펫 저장, 생성된 ID 반환
    pub async fn insert(&self, snippet: Snippet) -> Result<ObjectId, AppError> {
        let result = self
            .collection()
            .insert_one(&snippet)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError("inserted id is not an ObjectId".to_string()))
    }

    /// ID로 단건 조회 (파일 본문 포함)
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 잘못된 ObjectId 형식
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Snippet>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid Id".to_string()))?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 제목/언어 부분 일치 검색 (대소문자 무시)
    ///
    /// `owner`가 주어지면 해당 사용자의 스니펫으로 범위를 한정합니다.
    /// 정렬은 저장소 기본 순서를 따릅니다.
    pub async fn search(
        &self,
        query: &str,
        offset: u64,
        limit: i64,
        owner: Option<ObjectId>,
    ) -> Result<Vec<SnippetSummary>, AppError> {
        let mut filter = doc! {
            "$or": [
                { "title": { "$regex": query, "$options": "i" } },
                { "files.language": { "$regex": query, "$options": "i" } },
            ]
        };

        if let Some(owner) = owner {
            filter.insert("user", owner);
        }

        let cursor = self
            .summary_collection()
            .find(filter)
            .projection(summary_projection(owner.is_some()))
            .skip(offset)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 소유자 스코프 전체 교체 (제목 + 파일)
    ///
    /// `{_id, user}`가 모두 일치하는 문서만 갱신합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(true)` - 매칭되어 갱신됨
    /// * `Ok(false)` - id/소유자 불일치 (호출자가 에러로 변환)
    pub async fn replace_owned(
        &self,
        id: ObjectId,
        owner: ObjectId,
        title: &str,
        files: &[SnippetFile],
    ) -> Result<bool, AppError> {
        let files_bson =
            to_bson(files).map_err(|e| AppError::InternalError(e.to_string()))?;

        let result = self
            .collection()
            .update_one(
                doc! { "_id": id, "user": owner },
                doc! { "$set": { "title": title, "files": files_bson } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.matched_count == 1)
    }

    /// 소유자 스코프 삭제, 삭제 건수(0 또는 1) 반환
    pub async fn delete_owned(&self, id: ObjectId, owner: ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id, "user": owner })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_projection_excludes_owner_in_global_search() {
        let projection = summary_projection(false);
        assert!(!projection.contains_key("user"));
        assert_eq!(projection.get_i32("title").unwrap(), 1);
        assert_eq!(projection.get_i32("files.language").unwrap(), 1);
    }

    #[test]
    fn test_summary_projection_includes_owner_in_user_search() {
        let projection = summary_projection(true);
        assert_eq!(projection.get_i32("user").unwrap(), 1);
    }
}

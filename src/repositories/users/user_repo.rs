//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다. `users` 컬렉션에 대한
//! CRUD 연산과 사용자명/이메일 조회, 정규식 검색을 제공합니다.
//!
//! ## 데이터 무결성
//!
//! 유니크성은 사전 조회가 아니라 컬렉션의 유니크 인덱스로 강제됩니다.
//! 중복 삽입/변경은 E11000 쓰기 에러로 돌아오며, 위반 필드명을 담은
//! `AppError::DuplicateField`로 변환됩니다. 체크 후 저장 방식의
//! 경쟁 조건이 존재하지 않습니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::db::Database;
use crate::domain::entities::user::User;
use crate::errors::AppError;
use crate::repositories::map_write_error;

/// 사용자 데이터 액세스 리포지토리
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>("users")
    }

    /// 새 사용자 저장
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::DuplicateField)` - username 또는 email 유니크 위반
    /// * `Err(AppError::DatabaseError)` - 그 외 데이터베이스 오류
    pub async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(map_write_error)?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// ID로 사용자 조회
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 잘못된 ObjectId 형식
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid Id".to_string()))?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자명으로 조회
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 이메일로 조회
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자명 또는 이메일로 조회
    ///
    /// 로그인 폼의 `username` 필드는 양쪽 모두를 받을 수 있습니다.
    pub async fn find_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! {
                "$or": [
                    { "username": username_or_email },
                    { "email": username_or_email },
                ]
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자 필드 부분 업데이트
    ///
    /// `$set`으로 지정 필드만 변경하고 `updated_at`을 함께 갱신합니다.
    /// 변경된 최신 문서를 반환합니다. username/email 변경이 유니크
    /// 인덱스에 걸리면 `DuplicateField`로 실패합니다.
    pub async fn update_fields(
        &self,
        id: ObjectId,
        mut update_doc: Document,
    ) -> Result<Option<User>, AppError> {
        update_doc.insert("updated_at", DateTime::now());

        self.collection()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update_doc })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_write_error)
    }

    /// 사용자명 부분 일치 검색 (대소문자 무시)
    pub async fn search(
        &self,
        query: &str,
        offset: u64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        let cursor = self
            .collection()
            .find(doc! { "username": { "$regex": query, "$options": "i" } })
            .skip(offset)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증(사용자명/이메일 + 비밀번호)과 Google 소셜 가입을 모두
//! 하나의 모델로 표현합니다. 소셜 가입 사용자도 내부적으로는 무작위
//! 비밀번호를 가진 로컬 계정으로 저장됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// `username`과 `email`은 컬렉션의 유니크 인덱스로 보호됩니다.
/// 비밀번호는 bcrypt 해시로만 저장되며 솔트는 해시에 내장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자명 (unique, 공백 불가)
    pub username: String,
    /// 이메일 주소 (unique)
    pub email: String,
    /// bcrypt 해시된 비밀번호
    pub password_hash: String,
    /// 이메일 인증 여부
    #[serde(default)]
    pub email_verified: bool,
    /// 생성 시각
    pub created_at: DateTime,
    /// 수정 시각
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성 (저장 전, ID 미할당 상태)
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        email_verified: bool,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            email,
            password_hash,
            email_verified,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID의 16진수 문자열 표현
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

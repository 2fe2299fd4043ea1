//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 전체 생명주기를 관리하는 핵심 비즈니스 로직입니다.
//! 등록, 인증, 소셜 가입, 사용자명/이메일/비밀번호 변경을 담당합니다.
//!
//! ## 보안 설계 원칙
//!
//! - **bcrypt 해싱**: 솔트가 해시에 내장되는 적응형 해시 함수 사용
//! - **균일한 인증 실패**: 사용자명 오류와 비밀번호 오류를 구분하지 않고
//!   동일하게 `None`으로 반환, 호출자는 단일 "Invalid Credentials!"로 응답
//! - **저장소 수준 유니크 강제**: 중복 검사는 유니크 인덱스 위반으로만
//!   표면화, 체크 후 저장 경쟁 없음

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use mongodb::bson::doc;

use crate::domain::entities::user::User;
use crate::errors::AppError;
use crate::repositories::users::UserRepository;
use crate::utils::string_utils::{
    derive_username, random_numeric_suffix, random_opaque_password, FALLBACK_SUFFIX_DIGITS,
};

/// 유니크 사용자명 생성 시 접미사 재시도 상한
///
/// 상한 도달 시 사실상 유니크한 길이의 폴백 접미사로 전환합니다.
/// 적대적/혼잡한 사용자명에서도 무한 루프가 생기지 않습니다.
const MAX_USERNAME_ATTEMPTS: u32 = 10;

/// `attempt` 회차의 사용자명 후보 생성
///
/// 회차가 늘수록 접미사 자릿수가 커져 충돌 확률이 줄어듭니다.
fn username_candidate(base: &str, attempt: u32) -> String {
    format!("{}{}", base, random_numeric_suffix(attempt))
}

/// 사용자 관리 비즈니스 로직 서비스
pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// 새 사용자 계정 생성
    ///
    /// # Errors
    ///
    /// * `AppError::DuplicateField` - username/email 유니크 위반 (위반 필드명 포함)
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        email_verified: bool,
    ) -> Result<User, AppError> {
        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let user = User::new(
            username.to_string(),
            email.to_string(),
            password_hash,
            email_verified,
        );

        self.user_repo.insert(user).await
    }

    /// 사용자명 또는 이메일과 비밀번호로 인증
    ///
    /// 존재하지 않는 계정과 비밀번호 불일치는 호출자에게 구분되지 않는
    /// `Ok(None)`으로 돌아갑니다.
    pub async fn authenticate(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let user = match self
            .user_repo
            .find_by_username_or_email(username_or_email)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        match verify(password, &user.password_hash) {
            Ok(true) => Ok(Some(user)),
            // 불일치와 해시 파싱 오류를 구분하지 않는다
            _ => Ok(None),
        }
    }

    /// 소셜 로그인 처리
    ///
    /// 이메일로 기존 계정을 우선 해석하고, 없으면 표시 이름에서 파생한
    /// 유니크 사용자명과 불투명 무작위 비밀번호로 새 계정을 만듭니다.
    pub async fn social_login(
        &self,
        display_name: &str,
        email: &str,
        email_verified: bool,
    ) -> Result<User, AppError> {
        if let Some(existing) = self.user_repo.find_by_email(email).await? {
            return Ok(existing);
        }

        self.create_social_user(display_name, email, email_verified)
            .await
    }

    /// 소셜 가입 사용자 생성 (유니크 사용자명 보장)
    ///
    /// 기본 사용자명이 이미 사용 중이면 무작위 숫자 접미사를 붙여
    /// 최대 `MAX_USERNAME_ATTEMPTS`회 재시도하고, 그래도 충돌하면
    /// 사실상 유니크한 폴백 접미사를 사용합니다.
    pub async fn create_social_user(
        &self,
        display_name: &str,
        email: &str,
        email_verified: bool,
    ) -> Result<User, AppError> {
        let base = derive_username(display_name);
        let password = random_opaque_password();

        match self
            .create_user(&base, email, &password, email_verified)
            .await
        {
            Ok(user) => return Ok(user),
            Err(AppError::DuplicateField(field)) if field == "username" => {}
            Err(e) => return Err(e),
        }

        for attempt in 1..=MAX_USERNAME_ATTEMPTS {
            let candidate = username_candidate(&base, attempt);
            match self
                .create_user(&candidate, email, &password, email_verified)
                .await
            {
                Ok(user) => return Ok(user),
                Err(AppError::DuplicateField(field)) if field == "username" => continue,
                Err(e) => return Err(e),
            }
        }

        // 최종 폴백: 12자리 접미사는 사실상 충돌하지 않는다
        let fallback = format!("{}{}", base, random_numeric_suffix(FALLBACK_SUFFIX_DIGITS));
        self.create_user(&fallback, email, &password, email_verified)
            .await
    }

    /// 사용자명 변경
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 기존 사용자명과 동일
    /// * `AppError::DuplicateField` - 이미 사용 중인 사용자명
    pub async fn change_username(&self, user: &User, new_username: &str) -> Result<User, AppError> {
        if user.username == new_username {
            return Err(AppError::ValidationError(
                "Provide A different Username than the existing one.".to_string(),
            ));
        }

        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

        self.user_repo
            .update_fields(id, doc! { "username": new_username })
            .await?
            .ok_or_else(|| AppError::NotFound("User not Found!".to_string()))
    }

    /// 이메일 변경 (변경 시 인증 상태가 초기화됨)
    pub async fn change_email(&self, user: &User, new_email: &str) -> Result<User, AppError> {
        if user.email == new_email {
            return Err(AppError::ValidationError(
                "Provide A different Email than the existing one.".to_string(),
            ));
        }

        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

        self.user_repo
            .update_fields(id, doc! { "email": new_email, "email_verified": false })
            .await?
            .ok_or_else(|| AppError::NotFound("User not Found!".to_string()))
    }

    /// 로그인 상태에서의 비밀번호 변경 (이전 비밀번호 재검증)
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 새 비밀번호가 이전과 동일하거나 이전 비밀번호 불일치
    pub async fn change_password(
        &self,
        user: &User,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::ValidationError(
                "New Password must be different than the old one!".to_string(),
            ));
        }

        let old_matches = verify(old_password, &user.password_hash).unwrap_or(false);
        if !old_matches {
            return Err(AppError::ValidationError("Invalid Old Password".to_string()));
        }

        self.set_password(user, new_password).await
    }

    /// 비밀번호 설정 (reset 토큰 게이트를 통과한 호출자용)
    pub async fn set_password(&self, user: &User, new_password: &str) -> Result<(), AppError> {
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

        let password_hash = hash(new_password, DEFAULT_COST)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        self.user_repo
            .update_fields(id, doc! { "password_hash": password_hash })
            .await?
            .ok_or_else(|| AppError::NotFound("User not Found!".to_string()))?;

        Ok(())
    }

    /// 이메일 인증 완료 처리
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 이미 인증된 이메일
    pub async fn mark_email_verified(&self, user: &User) -> Result<(), AppError> {
        if user.email_verified {
            return Err(AppError::ValidationError(
                "Email Already Verified!".to_string(),
            ));
        }

        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

        self.user_repo
            .update_fields(id, doc! { "email_verified": true })
            .await?
            .ok_or_else(|| AppError::NotFound("User not Found!".to_string()))?;

        Ok(())
    }

    /// ID로 조회
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_id(id).await
    }

    /// 사용자명으로 조회
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_username(username).await
    }

    /// 사용자명 또는 이메일로 조회 (비밀번호 재설정 요청용)
    pub async fn get_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> Result<Option<User>, AppError> {
        self.user_repo
            .find_by_username_or_email(username_or_email)
            .await
    }

    /// 사용자명 부분 일치 검색
    pub async fn find_users(
        &self,
        query: &str,
        offset: u64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        self.user_repo.search(query, offset, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_candidate_suffix_grows_with_attempt() {
        let base = "John_Doe";
        for attempt in 1..=MAX_USERNAME_ATTEMPTS {
            let candidate = username_candidate(base, attempt);
            assert!(candidate.starts_with(base));
            let suffix = &candidate[base.len()..];
            assert_eq!(suffix.len() as u32, attempt);
            assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_bcrypt_round_trip() {
        // 테스트에서는 낮은 cost로 충분하다
        let hashed = bcrypt::hash("pw1", 4).unwrap();
        assert!(verify("pw1", &hashed).unwrap());
        assert!(!verify("pw2", &hashed).unwrap());
    }
}

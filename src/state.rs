//! 애플리케이션 상태 모듈
//!
//! 기동 시 한 번 구성되는 서비스들의 집합입니다. `web::Data`로 래핑되어
//! 모든 요청 핸들러와 미들웨어에 참조로 공유되며, 기동 이후에는
//! 읽기 전용입니다.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Database;
use crate::errors::AppError;
use crate::repositories::snippets::SnippetRepository;
use crate::repositories::users::UserRepository;
use crate::services::auth::{GoogleAuthService, TokenService};
use crate::services::mail::MailService;
use crate::services::snippets::SnippetService;
use crate::services::users::UserService;

/// 애플리케이션 공유 상태
pub struct AppState {
    pub config: AppConfig,
    pub token_service: TokenService,
    pub user_service: UserService,
    pub snippet_service: SnippetService,
    pub google_auth: GoogleAuthService,
    pub mail_service: MailService,
}

impl AppState {
    /// 설정과 데이터베이스 연결로부터 전체 서비스 그래프를 구성합니다.
    pub fn build(db: Arc<Database>, config: AppConfig) -> Result<Self, AppError> {
        let user_repo = Arc::new(UserRepository::new(db.clone()));
        let snippet_repo = Arc::new(SnippetRepository::new(db));

        let token_service = TokenService::new(config.jwt.clone());
        let user_service = UserService::new(user_repo);
        let snippet_service = SnippetService::new(snippet_repo);
        let google_auth = GoogleAuthService::new(config.google.clone());
        let mail_service = MailService::new(config.mail.clone())?;

        Ok(Self {
            config,
            token_service,
            user_service,
            snippet_service,
            google_auth,
            mail_service,
        })
    }
}

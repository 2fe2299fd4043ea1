//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 사용자, 스니펫 관련 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Route Groups
//!
//! - `/api/users` - 회원가입, 로그인, 토큰 재발급, 계정 관리
//! - `/api/snippet` - 스니펫 CRUD와 검색
//! - `/health` - 헬스체크
//!
//! # Auth Middleware Usage
//!
//! 같은 프리픽스 아래에 공개 라우트와 보호 라우트가 섞여 있으므로,
//! 공개 라우트를 먼저 등록하고 보호 라우트는 빈 프리픽스의 내부
//! 스코프에 `AuthMiddleware`를 감싸서 마지막에 등록합니다.
//! 재설정 토큰 전용 라우트 두 개는 리소스 단위로 래핑합니다.

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_user_routes(cfg);
    configure_snippet_routes(cfg);
}

/// 사용자 관련 라우트를 설정합니다
///
/// ## Public 라우트
/// - `POST /api/users/register` - 회원가입
/// - `POST /api/users/login` - 로컬 로그인
/// - `POST /api/users/auth/google` - Google 로그인
/// - `GET|POST /api/users/token/refresh` - 액세스 토큰 재발급
/// - `POST /api/users/req-password` - 비밀번호 재설정 메일 요청
/// - `GET /api/users/verify-email/{token}` - 이메일 인증 확정
/// - `GET /api/users` - 사용자 검색
///
/// ## Reset 토큰 라우트 (`Authorization: Reset <token>`)
/// - `GET /api/users/forgot-password` - 재설정 링크 유효성 확인
/// - `POST /api/users/reset-password` - 새 비밀번호 설정
///
/// ## Bearer 라우트
/// - `POST /api/users/change-username`
/// - `POST /api/users/change-email`
/// - `POST /api/users/change-password`
/// - `GET /api/users/req-verification`
/// - `POST /api/users/logout`
/// - `POST /api/users` - 내 프로필 조회 (핸들러 내부 인증)
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            // Public routes
            .service(handlers::users::register)
            .service(handlers::users::login)
            .service(handlers::users::google_login)
            .service(handlers::users::req_password)
            .service(handlers::users::verify_email)
            .service(
                web::resource("/token/refresh")
                    .route(web::get().to(handlers::users::refresh))
                    .route(web::post().to(handlers::users::refresh)),
            )
            // Reset token routes
            .service(
                web::resource("/forgot-password")
                    .wrap(AuthMiddleware::reset())
                    .route(web::get().to(handlers::users::forgot_password)),
            )
            .service(
                web::resource("/reset-password")
                    .wrap(AuthMiddleware::reset())
                    .route(web::post().to(handlers::users::reset_password)),
            )
            // GET은 공개 검색, POST는 핸들러 내부에서 bearer 인증
            .service(
                web::resource("")
                    .route(web::get().to(handlers::users::find_users))
                    .route(web::post().to(handlers::users::get_user)),
            )
            // Bearer routes
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::bearer())
                    .service(handlers::users::change_username)
                    .service(handlers::users::change_email)
                    .service(handlers::users::change_password)
                    .service(handlers::users::req_verification)
                    .service(handlers::users::logout),
            ),
    );
}

/// 스니펫 관련 라우트를 설정합니다
///
/// ## Public 라우트
/// - `GET /api/snippet` - 전체 검색
/// - `GET /api/snippet/get/{id}` - 단건 조회
/// - `GET /api/snippet/user/{username}` - 사용자별 검색
///
/// ## Bearer 라우트
/// - `POST /api/snippet/add`
/// - `POST /api/snippet/update`
/// - `DELETE /api/snippet/delete`
fn configure_snippet_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/snippet")
            // Public routes
            .service(handlers::snippets::get_snippet)
            .service(handlers::snippets::get_user_snippets)
            .service(web::resource("").route(web::get().to(handlers::snippets::find_all)))
            // Bearer routes
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::bearer())
                    .service(handlers::snippets::add_snippet)
                    .service(handlers::snippets::update_snippet)
                    .service(handlers::snippets::delete_snippet),
            ),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "snippet_service_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

//! 사용자 HTTP 핸들러
//!
//! 회원가입, 로그인(로컬/Google), 토큰 재발급, 계정 정보 변경,
//! 비밀번호 재설정, 이메일 인증 엔드포인트를 처리합니다.
//!
//! 인증 성공 응답은 항상 동일한 형태입니다. access 토큰은 본문으로,
//! refresh 토큰은 본문과 HttpOnly 쿠키 양쪽으로 내려갑니다.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::{
    AuthDetailsResponse, ChangeEmailRequest, ChangePasswordRequest, ChangeUsernameRequest,
    GoogleLoginRequest, LoginRequest, RefreshResponse, RegisterRequest, ReqPasswordRequest,
    ResetPasswordRequest, UserResponse, UserSearchQuery,
};
use crate::domain::entities::user::User;
use crate::domain::token::TokenPurpose;
use crate::errors::AppError;
use crate::handlers::validation_message;
use crate::middlewares::auth_inner::authenticate;
use crate::middlewares::auth_middleware::AuthScheme;
use crate::middlewares::AuthedUser;
use crate::state::AppState;

/// refresh 쿠키 이름
const REFRESH_COOKIE: &str = "refresh";

/// refresh 쿠키 생성
///
/// SPA가 다른 오리진에서 자격증명을 보내야 하므로 SameSite=None이고,
/// secure 플래그는 운영 환경에서만 켜집니다.
fn refresh_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, value)
        .path("/")
        .max_age(CookieDuration::seconds(
            TokenPurpose::Refresh.expiry().num_seconds(),
        ))
        .http_only(true)
        .secure(state.config.server.in_production)
        .same_site(SameSite::None)
        .finish()
}

/// 인증 성공 공통 응답 (register/login/google)
///
/// access/refresh 토큰을 발급하고 refresh 쿠키를 설정합니다.
fn auth_details(
    state: &AppState,
    user: &User,
    status: StatusCode,
) -> Result<HttpResponse, AppError> {
    let id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

    let access = state.token_service.issue(TokenPurpose::Access, &id, None)?;
    let refresh = state
        .token_service
        .issue(TokenPurpose::Refresh, &id, Some(&user.username))?;

    let cookie = refresh_cookie(state, refresh.clone());

    let body = AuthDetailsResponse {
        username: user.username.clone(),
        access,
        refresh,
        refresh_max_age: TokenPurpose::Refresh.expiry().num_milliseconds(),
        id,
    };

    Ok(HttpResponse::build(status).cookie(cookie).json(body))
}

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/users/register`
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(validation_message(&e)))?;

    let user = state
        .user_service
        .create_user(&payload.username, &payload.email, &payload.password, false)
        .await?;

    log::info!("회원가입 완료: {}", user.username);
    auth_details(&state, &user, StatusCode::CREATED)
}

/// 로컬 로그인 핸들러
///
/// `username` 필드에 사용자명 또는 이메일을 받을 수 있습니다.
/// 계정 부재와 비밀번호 불일치는 같은 문구로 실패합니다.
///
/// # Endpoint
/// `POST /api/users/login`
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(validation_message(&e)))?;

    let user = state
        .user_service
        .authenticate(&payload.username, &payload.password)
        .await?
        .ok_or_else(|| AppError::ValidationError("Invalid Credentials!".to_string()))?;

    auth_details(&state, &user, StatusCode::ACCEPTED)
}

/// Google 로그인 핸들러
///
/// 프론트엔드의 Google Sign-In이 돌려준 credential을 검증하고,
/// 이메일로 기존 계정을 찾거나 새 계정을 만든 뒤 로그인시킵니다.
///
/// # Endpoint
/// `POST /api/users/auth/google`
#[post("/auth/google")]
pub async fn google_login(
    state: web::Data<AppState>,
    payload: web::Json<GoogleLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(validation_message(&e)))?;

    let info = state.google_auth.verify_credential(&payload.credential).await?;

    let user = state
        .user_service
        .social_login(&info.name, &info.email, info.email_verified)
        .await?;

    log::info!("Google 로그인: {}", user.username);
    auth_details(&state, &user, StatusCode::ACCEPTED)
}

/// 액세스 토큰 재발급 핸들러 (GET/POST 공용)
///
/// refresh 쿠키의 토큰만으로 새 액세스 토큰을 발급합니다.
/// 쿠키 부재, 만료, 서명 불일치는 모두 같은 401로 수렴합니다.
///
/// # Endpoint
/// `GET|POST /api/users/token/refresh`
pub async fn refresh(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let claims = req
        .cookie(REFRESH_COOKIE)
        .and_then(|cookie| {
            state
                .token_service
                .verify(cookie.value(), TokenPurpose::Refresh)
                .ok()
        })
        .ok_or_else(|| AppError::Unauthorized("User not Logged in!".to_string()))?;

    let access = state
        .token_service
        .issue(TokenPurpose::Access, &claims.sub, None)?;

    Ok(HttpResponse::Accepted().json(RefreshResponse {
        access,
        username: claims.username,
        id: claims.sub,
    }))
}

/// 사용자명 변경 핸들러
///
/// # Endpoint
/// `POST /api/users/change-username` (bearer)
#[post("/change-username")]
pub async fn change_username(
    state: web::Data<AppState>,
    user: AuthedUser,
    payload: web::Json<ChangeUsernameRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(validation_message(&e)))?;

    state
        .user_service
        .change_username(&user.0, &payload.username)
        .await?;

    Ok(HttpResponse::Accepted().body("Username Changed Successfully"))
}

/// 이메일 변경 핸들러
///
/// 변경 시 이메일 인증 상태가 초기화됩니다.
///
/// # Endpoint
/// `POST /api/users/change-email` (bearer)
#[post("/change-email")]
pub async fn change_email(
    state: web::Data<AppState>,
    user: AuthedUser,
    payload: web::Json<ChangeEmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(validation_message(&e)))?;

    state
        .user_service
        .change_email(&user.0, &payload.email)
        .await?;

    Ok(HttpResponse::Accepted().body("Email Changed Successfully"))
}

/// 비밀번호 재설정 메일 요청 핸들러
///
/// 계정이 있으면 reset 토큰이 담긴 링크를 이메일로 보냅니다.
///
/// # Endpoint
/// `POST /api/users/req-password`
#[post("/req-password")]
pub async fn req_password(
    state: web::Data<AppState>,
    payload: web::Json<ReqPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(validation_message(&e)))?;

    let user = state
        .user_service
        .get_by_username_or_email(&payload.username)
        .await?
        .ok_or_else(|| AppError::ValidationError("Invalid Credentials!".to_string()))?;

    let id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;
    let reset = state.token_service.issue(TokenPurpose::Reset, &id, None)?;

    state.mail_service.send_reset_mail(&user, &reset);

    Ok(HttpResponse::Ok().body("Reset Password Link sent to the email successfully!"))
}

/// 재설정 링크 유효성 확인 핸들러
///
/// 프론트엔드가 재설정 폼을 보여주기 전에 링크가 아직 유효한지
/// 확인하는 용도입니다. Reset 미들웨어를 통과했다면 링크는 유효합니다.
///
/// # Endpoint
/// `GET /api/users/forgot-password` (`Reset <token>`)
pub async fn forgot_password(_user: AuthedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Accepted().body("Valid Link!"))
}

/// 재설정 토큰으로 새 비밀번호를 설정하는 핸들러
///
/// # Endpoint
/// `POST /api/users/reset-password` (`Reset <token>`)
pub async fn reset_password(
    state: web::Data<AppState>,
    user: AuthedUser,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(validation_message(&e)))?;

    state
        .user_service
        .set_password(&user.0, &payload.password)
        .await?;

    Ok(HttpResponse::Accepted().body("Password Changed Successfully"))
}

/// 로그인 상태에서의 비밀번호 변경 핸들러
///
/// # Endpoint
/// `POST /api/users/change-password` (bearer)
#[post("/change-password")]
pub async fn change_password(
    state: web::Data<AppState>,
    user: AuthedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(validation_message(&e)))?;

    state
        .user_service
        .change_password(&user.0, &payload.old_password, &payload.new_password)
        .await?;

    Ok(HttpResponse::Accepted().body("Password Changed Successfully"))
}

/// 이메일 인증 메일 요청 핸들러
///
/// # Endpoint
/// `GET /api/users/req-verification` (bearer)
#[get("/req-verification")]
pub async fn req_verification(
    state: web::Data<AppState>,
    user: AuthedUser,
) -> Result<HttpResponse, AppError> {
    if user.0.email_verified {
        return Err(AppError::ValidationError(
            "Email Already Verified!".to_string(),
        ));
    }

    let id = user
        .0
        .id_string()
        .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;
    let token = state.token_service.issue(TokenPurpose::Verify, &id, None)?;

    state.mail_service.send_verification_mail(&user.0, &token);

    Ok(HttpResponse::Ok().body("Email verification Link sent to the email successfully!"))
}

/// 이메일 인증 확정 핸들러
///
/// 링크 속 verify 토큰을 검증하고 해당 계정을 인증 완료로 표시합니다.
/// 토큰 오류와 계정 부재는 모두 "Invalid Link!"로 수렴합니다.
///
/// # Endpoint
/// `GET /api/users/verify-email/{token}`
#[get("/verify-email/{token}")]
pub async fn verify_email(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let token = path.into_inner();

    let claims = state
        .token_service
        .verify(&token, TokenPurpose::Verify)
        .ok()
        .ok_or_else(|| AppError::ValidationError("Invalid Link!".to_string()))?;

    let user = state
        .user_service
        .get_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::ValidationError("Invalid Link!".to_string()))?;

    state.user_service.mark_email_verified(&user).await?;

    log::info!("이메일 인증 완료: {}", user.username);
    Ok(HttpResponse::Accepted().json("Verified!"))
}

/// 로그아웃 핸들러
///
/// 서버 측 세션이 없으므로 refresh 쿠키 제거가 전부입니다.
///
/// # Endpoint
/// `POST /api/users/logout` (bearer)
#[post("/logout")]
pub async fn logout(_user: AuthedUser) -> Result<HttpResponse, AppError> {
    let mut cookie = Cookie::build(REFRESH_COOKIE, "").path("/").finish();
    cookie.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .body("User logged Out Successfully!"))
}

/// 내 프로필 조회 핸들러
///
/// 같은 경로의 GET이 공개 검색이라 스코프 단위 미들웨어를 쓸 수 없어
/// 인증 검사를 핸들러 안에서 직접 수행합니다.
///
/// # Endpoint
/// `POST /api/users/` (bearer)
pub async fn get_user(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let user = authenticate(&req, AuthScheme::Bearer).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// 사용자명 부분 일치 검색 핸들러
///
/// # Endpoint
/// `GET /api/users/?q=&offset=&limit=`
pub async fn find_users(
    state: web::Data<AppState>,
    query: web::Query<UserSearchQuery>,
) -> Result<HttpResponse, AppError> {
    let users = state
        .user_service
        .find_users(&query.q, query.offset, query.limit)
        .await?;

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

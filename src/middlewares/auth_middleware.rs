//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Authorization 헤더의 토큰을 검증하고
//! 해당 사용자를 조회해 Request Extensions에 저장합니다.
//! 일반 API는 `Bearer` 스킴을, 비밀번호 재설정 링크 전용 라우트는
//! `Reset` 스킴을 사용합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest, Result,
};

use crate::domain::entities::user::User;
use crate::errors::AppError;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// Authorization 헤더의 토큰 스킴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Bearer <access token>`
    Bearer,
    /// `Reset <reset token>` (비밀번호 재설정 링크 전용)
    Reset,
}

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    scheme: AuthScheme,
}

impl AuthMiddleware {
    /// 액세스 토큰 인증 미들웨어 생성
    pub fn bearer() -> Self {
        Self {
            scheme: AuthScheme::Bearer,
        }
    }

    /// 재설정 토큰 인증 미들웨어 생성
    pub fn reset() -> Self {
        Self {
            scheme: AuthScheme::Reset,
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            scheme: self.scheme,
        }))
    }
}

/// 미들웨어가 Extensions에 저장한 인증 사용자를 꺼내는 핸들러 추출기
///
/// 인증 미들웨어가 적용되지 않은 라우트에서 사용하면 401을 반환합니다.
pub struct AuthedUser(pub User);

impl FromRequest for AuthedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<User>().cloned();
        ready(
            user.map(AuthedUser)
                .ok_or_else(|| AppError::Unauthorized("User not Logged in!".to_string()).into()),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::middlewares::auth_inner::{extract_bearer_token, extract_reset_token};

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("bearer abc"), None);
        assert_eq!(extract_bearer_token("Reset abc"), None);
        assert_eq!(extract_bearer_token("Bearer"), None);
    }

    #[test]
    fn test_extract_reset_token() {
        assert_eq!(extract_reset_token("Reset abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_reset_token("Bearer abc.def.ghi"), None);
        assert_eq!(extract_reset_token("Reset"), None);
        assert_eq!(extract_reset_token(""), None);
    }
}

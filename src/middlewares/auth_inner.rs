//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::entities::user::User;
use crate::domain::token::TokenPurpose;
use crate::errors::AppError;
use crate::middlewares::auth_middleware::AuthScheme;
use crate::state::AppState;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub scheme: AuthScheme,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let scheme = self.scheme;

        Box::pin(async move {
            match authenticate(req.request(), scheme).await {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 {}", user.username);
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::warn!("인증 실패: {}", err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response).map_into_right_body();
                    Ok(res)
                }
            }
        })
    }
}

/// 요청의 Authorization 헤더를 검증하고 토큰 소유자를 조회합니다.
///
/// 미들웨어 경로 외에, 같은 경로에 공개/인증 메서드가 섞여 있어
/// 스코프 래핑이 불가능한 핸들러에서도 직접 호출됩니다.
pub async fn authenticate(req: &HttpRequest, scheme: AuthScheme) -> Result<User, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Application state is not configured".to_string()))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match scheme {
        AuthScheme::Bearer => {
            let token = header_value
                .and_then(extract_bearer_token)
                .ok_or_else(|| AppError::Unauthorized("User not Logged in!".to_string()))?;

            let claims = state
                .token_service
                .verify(token, TokenPurpose::Access)
                .ok()
                .ok_or_else(|| AppError::Unauthorized("User not Logged in!".to_string()))?;

            state
                .user_service
                .get_by_id(&claims.sub)
                .await?
                .ok_or_else(|| AppError::Unauthorized("User not Logged in!".to_string()))
        }
        AuthScheme::Reset => {
            // 재설정 링크는 헤더 자체가 없거나 스킴이 다르면 잘못된 링크로 취급
            let token = header_value
                .and_then(extract_reset_token)
                .ok_or_else(|| AppError::ValidationError("Invalid Link!".to_string()))?;

            let claims = state
                .token_service
                .verify(token, TokenPurpose::Reset)
                .ok()
                .ok_or_else(|| AppError::Unauthorized("Invalid Link!".to_string()))?;

            state
                .user_service
                .get_by_id(&claims.sub)
                .await?
                .ok_or_else(|| AppError::Unauthorized("Invalid Link!".to_string()))
        }
    }
}

/// `Bearer <token>` 헤더에서 토큰 부분을 추출합니다.
pub(crate) fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").filter(|t| !t.is_empty())
}

/// `Reset <token>` 헤더에서 토큰 부분을 추출합니다.
pub(crate) fn extract_reset_token(header: &str) -> Option<&str> {
    header.strip_prefix("Reset ").filter(|t| !t.is_empty())
}

//! 스니펫 HTTP 핸들러
//!
//! 스니펫 등록, 검색, 단건 조회, 수정, 삭제 엔드포인트를 처리합니다.
//! 목록 응답은 파일 본문을 제외한 요약 프로젝션이고,
//! 수정/삭제는 인증 사용자 소유의 스니펫만 대상이 됩니다.

use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;

use crate::domain::dto::snippets::{
    AddSnippetRequest, AddSnippetResponse, DeleteSnippetRequest, SnippetResponse,
    SnippetSearchQuery, SnippetSummaryResponse, UpdateSnippetRequest,
};
use crate::errors::AppError;
use crate::middlewares::AuthedUser;
use crate::state::AppState;

/// 스니펫 등록 핸들러
///
/// # Endpoint
/// `POST /api/snippet/add` (bearer)
#[post("/add")]
pub async fn add_snippet(
    state: web::Data<AppState>,
    user: AuthedUser,
    payload: web::Json<AddSnippetRequest>,
) -> Result<HttpResponse, AppError> {
    let owner = user
        .0
        .id
        .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

    let payload = payload.into_inner();
    let id = state
        .snippet_service
        .add(owner, payload.title, payload.files)
        .await?;

    log::info!("스니펫 등록: {} by {}", id.to_hex(), user.0.username);
    Ok(HttpResponse::Ok().json(AddSnippetResponse {
        message: "Saved Snippet Successfully".to_string(),
        id: id.to_hex(),
        user: owner.to_hex(),
    }))
}

/// 전체 스니펫 검색 핸들러
///
/// 제목 또는 파일 언어의 부분 일치로 검색합니다.
///
/// # Endpoint
/// `GET /api/snippet?q=&offset=&limit=`
pub async fn find_all(
    state: web::Data<AppState>,
    query: web::Query<SnippetSearchQuery>,
) -> Result<HttpResponse, AppError> {
    let summaries = state
        .snippet_service
        .search(&query.q, query.offset, query.limit, None)
        .await?;

    let body: Vec<SnippetSummaryResponse> = summaries
        .into_iter()
        .map(SnippetSummaryResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// 특정 사용자의 스니펫 검색 핸들러
///
/// # Endpoint
/// `GET /api/snippet/user/{username}?q=&offset=&limit=`
#[get("/user/{username}")]
pub async fn get_user_snippets(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SnippetSearchQuery>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();

    let user = state
        .user_service
        .get_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not Found!".to_string()))?;

    let owner = user
        .id
        .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

    let summaries = state
        .snippet_service
        .search(&query.q, query.offset, query.limit, Some(owner))
        .await?;

    let body: Vec<SnippetSummaryResponse> = summaries
        .into_iter()
        .map(SnippetSummaryResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// 스니펫 단건 조회 핸들러 (파일 본문 포함)
///
/// # Endpoint
/// `GET /api/snippet/get/{id}`
#[get("/get/{id}")]
pub async fn get_snippet(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let snippet = state.snippet_service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SnippetResponse::from(snippet)))
}

/// 스니펫 수정 핸들러 (제목과 파일 목록 전체 교체)
///
/// # Endpoint
/// `POST /api/snippet/update` (bearer)
#[post("/update")]
pub async fn update_snippet(
    state: web::Data<AppState>,
    user: AuthedUser,
    payload: web::Json<UpdateSnippetRequest>,
) -> Result<HttpResponse, AppError> {
    let owner = user
        .0
        .id
        .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

    let payload = payload.into_inner();
    state
        .snippet_service
        .update(&payload.id, owner, payload.title, payload.files)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Snippet updated Successfully" })))
}

/// 스니펫 삭제 핸들러
///
/// 대상이 없거나 소유자가 아니면 에러 대신 `deletedCount: 0`을 돌려줍니다.
///
/// # Endpoint
/// `DELETE /api/snippet/delete` (bearer)
#[delete("/delete")]
pub async fn delete_snippet(
    state: web::Data<AppState>,
    user: AuthedUser,
    payload: web::Json<DeleteSnippetRequest>,
) -> Result<HttpResponse, AppError> {
    let owner = user
        .0
        .id
        .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;

    let deleted = state.snippet_service.delete(&payload.id, owner).await?;

    Ok(HttpResponse::Ok().json(json!({ "deletedCount": deleted })))
}

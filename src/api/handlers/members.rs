use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::api::extract::PathMember;
use crate::domain::member::{Member, MemberDto};
use crate::domain::paging::{Page, PageRequest, Sort, DEFAULT_PAGE_SIZE};
use crate::domain::repositories::MemberRepository;
use crate::infrastructure::repositories::PostgresMemberRepository;

/// Paging query parameters (`?page=0&size=3&sort=username,desc`)
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl PageParams {
    /// Applies the listing defaults: first page of five, sorted by
    /// username ascending. Unknown sort keys are a 400.
    fn into_request(self) -> Result<PageRequest, ApiError> {
        let sort = match self.sort.as_deref() {
            Some(raw) => Sort::parse(raw).map_err(ApiError::bad_request)?,
            None => Sort::default(),
        };

        Ok(PageRequest::of(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
        ))
    }
}

/// Look up a member's username by id
///
/// GET /members/:id
pub async fn get_member_username(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<String, ApiError> {
    let repo = PostgresMemberRepository::new(pool);
    let member = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("member does not exist"))?;

    Ok(member.username().to_string())
}

/// Same lookup, with the path id resolved to an entity by the extractor
///
/// GET /members2/:id
pub async fn get_member_username_resolved(PathMember(member): PathMember) -> String {
    member.username().to_string()
}

/// Paged listing of raw member entities
///
/// GET /members?page=0&size=3&sort=username,desc
pub async fn list_members(
    State(pool): State<PgPool>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Member>>, ApiError> {
    let request = params.into_request()?;

    let repo = PostgresMemberRepository::new(pool);
    let page = repo.find_all_paged(&request).await?;

    Ok(Json(page))
}

/// Paged listing mapped to the flattened DTO
///
/// GET /members/dto
pub async fn list_member_dtos(
    State(pool): State<PgPool>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<MemberDto>>, ApiError> {
    let request = params.into_request()?;

    let repo = PostgresMemberRepository::new(pool);
    let page = repo.find_all_dto(&request).await?;

    Ok(Json(page))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

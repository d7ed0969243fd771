use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::domain::member::Member;
use crate::domain::repositories::MemberRepository;
use crate::infrastructure::repositories::PostgresMemberRepository;

/// Path extractor that resolves `{id}` straight to a loaded Member
///
/// Usage:
/// ```rust,ignore
/// async fn handler(PathMember(member): PathMember) -> String {
///     member.username().to_string()
/// }
/// ```
///
/// A missing member rejects with the same 500 the explicit lookup
/// produces.
pub struct PathMember(pub Member);

#[async_trait]
impl<S> FromRequestParts<S> for PathMember
where
    PgPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid member id: {}", e)))?;

        let repo = PostgresMemberRepository::new(PgPool::from_ref(state));
        let member = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::internal_server_error("member does not exist"))?;

        Ok(PathMember(member))
    }
}

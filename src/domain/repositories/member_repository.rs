use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::member::{
    Member, MemberDto, MemberProbe, MemberSummary, MemberWithTeam, NewMember,
};
use crate::domain::paging::{Page, PageRequest};

/// Repository trait for the Member entity
///
/// Declares every data-access operation the service uses. Each method
/// owns its query; there is no name-based derivation, so the method name
/// documents the predicate and the implementation supplies the SQL.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist a new member and return it with its generated id
    async fn save(&self, member: NewMember) -> RepositoryResult<Member>;

    /// Persist changes to an existing member (username, age, team)
    async fn update(&self, member: &Member) -> RepositoryResult<()>;

    /// Find a member by its ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>>;

    /// Find all members
    async fn find_all(&self) -> RepositoryResult<Vec<Member>>;

    /// Find one page of members, sorted per the request
    async fn find_all_paged(&self, request: &PageRequest) -> RepositoryResult<Page<Member>>;

    /// Count all members
    async fn count(&self) -> RepositoryResult<i64>;

    /// Delete a member by ID
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    /// Find all members with the given username
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Find at most one member with the given username
    async fn find_optional_by_username(&self, username: &str) -> RepositoryResult<Option<Member>>;

    /// Find members with the given username and an age strictly above
    /// the bound
    async fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: i32,
    ) -> RepositoryResult<Vec<Member>>;

    /// Find the first three members by username
    async fn find_top3(&self) -> RepositoryResult<Vec<Member>>;

    /// Find members matching username and age exactly
    async fn find_user(&self, username: &str, age: i32) -> RepositoryResult<Vec<Member>>;

    /// Project every member down to its username
    async fn find_username_list(&self) -> RepositoryResult<Vec<String>>;

    /// Project members on a team to the flattened DTO (members without
    /// a team are excluded)
    async fn find_member_dto(&self) -> RepositoryResult<Vec<MemberDto>>;

    /// Find members whose username is in the given collection
    async fn find_by_names(&self, names: &[String]) -> RepositoryResult<Vec<Member>>;

    /// Find one page of members with the given age, plus the total count
    /// for that predicate
    async fn find_by_age_paged(
        &self,
        age: i32,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Member>>;

    /// Increment the age of every member at or above the bound
    ///
    /// Returns the number of rows updated. This writes directly to the
    /// store; previously loaded `Member` values are not refreshed.
    async fn bulk_age_plus(&self, age: i32) -> RepositoryResult<u64>;

    /// Find members by username with their team fetched in the same
    /// query
    async fn find_with_team_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Vec<MemberWithTeam>>;

    /// Find a member by username inside a read-only transaction
    async fn find_read_only_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Option<Member>>;

    /// Find members by username under a pessimistic write lock
    ///
    /// The row locks last only for this call's transaction.
    async fn find_lock_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Find members matching the probe: set fields become equality
    /// predicates, unset fields are ignored
    async fn find_by_example(&self, probe: &MemberProbe) -> RepositoryResult<Vec<Member>>;

    /// Project members with the given username to username + team name
    async fn find_summaries_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Vec<MemberSummary>>;

    /// Find one page of members projected to the flattened DTO
    /// (left-joined, so teamless members appear with no team name)
    async fn find_all_dto(&self, request: &PageRequest) -> RepositoryResult<Page<MemberDto>>;
}

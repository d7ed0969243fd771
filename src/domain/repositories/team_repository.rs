use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::member::Member;
use crate::domain::team::{NewTeam, Team};

/// Repository trait for the Team entity
///
/// Defines the contract for persisting and retrieving teams.
/// Implementations should handle database-specific details.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Persist a new team and return it with its generated id
    async fn save(&self, team: NewTeam) -> RepositoryResult<Team>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>>;

    /// Find all teams
    async fn find_all(&self) -> RepositoryResult<Vec<Team>>;

    /// Count all teams
    async fn count(&self) -> RepositoryResult<i64>;

    /// Delete a team by ID
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    /// Find the members of a team
    ///
    /// This is the inverse side of the association; the owning column is
    /// `members.team_id`.
    async fn find_members(&self, team_id: i64) -> RepositoryResult<Vec<Member>>;
}

use serde::Serialize;
use sqlx::FromRow;

use super::member::Member;
use crate::domain::team::Team;

/// Flattened member view for API responses: the member plus its team's
/// name. Joined queries fill `team_name` directly; there are no lazy
/// proxies to traverse, so a member without a team carries `None`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MemberDto {
    pub id: i64,
    pub username: String,
    pub team_name: Option<String>,
}

impl MemberDto {
    /// Builds the DTO from loaded entities
    pub fn new(member: &Member, team: Option<&Team>) -> Self {
        Self {
            id: member.id(),
            username: member.username().to_string(),
            team_name: team.map(|t| t.name().to_string()),
        }
    }
}

/// Partial view of a member: username and team name only
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MemberSummary {
    pub username: String,
    pub team_name: Option<String>,
}

/// A member with its team fetched eagerly in the same query
#[derive(Debug, Clone, PartialEq)]
pub struct MemberWithTeam {
    pub member: Member,
    pub team: Option<Team>,
}

/// Example object for probe matching
///
/// Set fields become equality predicates; unset fields are ignored.
/// A set `team_name` matches against the joined team.
#[derive(Debug, Clone, Default)]
pub struct MemberProbe {
    pub username: Option<String>,
    pub age: Option<i32>,
    pub team_name: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Member entity
///
/// A member belongs to at most one team. `team_id` is the owning side of
/// the association; updating it is the only way a membership changes.
/// The referenced team must be persisted (enforced by the database
/// foreign key).
///
/// # Invariants
/// - Username is never empty
/// - Age is non-negative
///
/// # Example
/// ```
/// use roster_api::domain::member::NewMember;
///
/// let member = NewMember::new("memberA", 20).expect("valid member");
/// assert_eq!(member.username(), "memberA");
/// assert_eq!(member.age(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    id: i64,
    username: String,
    age: i32,
    team_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl Member {
    /// Reconstructs a Member from persisted column values
    pub fn from_persistence(
        id: i64,
        username: String,
        age: i32,
        team_id: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            age,
            team_id,
            created_at,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the member
    ///
    /// # Returns
    /// * `Err(String)` - If the new username is empty
    pub fn change_username(&mut self, username: impl Into<String>) -> Result<(), String> {
        let username = username.into();
        if username.is_empty() {
            return Err("Username cannot be empty".to_string());
        }
        self.username = username;
        Ok(())
    }

    /// Moves the member to another team, or out of any team
    ///
    /// Only this owning side changes; a previously loaded team's member
    /// list is not refreshed in memory.
    pub fn change_team(&mut self, team_id: Option<i64>) {
        self.team_id = team_id;
    }
}

/// A member that has not been persisted yet
///
/// Validation happens here, so every `Member` satisfies the entity
/// invariants from the moment it gets an id.
#[derive(Debug, Clone)]
pub struct NewMember {
    username: String,
    age: i32,
    team_id: Option<i64>,
}

impl NewMember {
    /// Creates a new member value, not yet on any team
    ///
    /// # Returns
    /// * `Ok(NewMember)` - If username is non-empty and age non-negative
    /// * `Err(String)` - If either invariant is violated
    pub fn new(username: impl Into<String>, age: i32) -> Result<Self, String> {
        let username = username.into();
        if username.is_empty() {
            return Err("Username cannot be empty".to_string());
        }
        if age < 0 {
            return Err(format!("Age cannot be negative: {}", age));
        }
        Ok(Self {
            username,
            age,
            team_id: None,
        })
    }

    /// Puts the member-to-be on a team
    pub fn with_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persisted(username: &str, age: i32) -> Member {
        Member::from_persistence(1, username.to_string(), age, None, Utc::now())
    }

    #[test]
    fn new_member_without_team() {
        let member = NewMember::new("memberA", 10).expect("valid member");
        assert_eq!(member.username(), "memberA");
        assert_eq!(member.age(), 10);
        assert_eq!(member.team_id(), None);
    }

    #[test]
    fn with_team_sets_owning_side() {
        let member = NewMember::new("memberA", 10)
            .expect("valid member")
            .with_team(42);
        assert_eq!(member.team_id(), Some(42));
    }

    #[test]
    fn empty_username_rejected() {
        assert!(NewMember::new("", 10).is_err());
    }

    #[test]
    fn negative_age_rejected() {
        assert!(NewMember::new("memberA", -1).is_err());
    }

    #[test]
    fn change_username_renames() {
        let mut member = persisted("member1", 10);
        member.change_username("member2").expect("valid rename");
        assert_eq!(member.username(), "member2");
    }

    #[test]
    fn change_username_rejects_empty() {
        let mut member = persisted("member1", 10);
        assert!(member.change_username("").is_err());
        assert_eq!(member.username(), "member1");
    }

    #[test]
    fn change_team_switches_and_clears() {
        let mut member = persisted("member1", 10);
        member.change_team(Some(3));
        assert_eq!(member.team_id(), Some(3));
        member.change_team(None);
        assert_eq!(member.team_id(), None);
    }
}

use chrono::{DateTime, Utc};

/// Team entity
///
/// Teams own members through the members' `team_id` column. The member
/// list is deliberately not held on this struct: the owning side of the
/// association is `Member::team_id`, and a team's members are read
/// through `TeamRepository::find_members` so the in-memory view can
/// never go stale against the column that defines it.
///
/// # Invariants
/// - Name is never empty
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Reconstructs a Team from persisted column values
    pub fn from_persistence(id: i64, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A team that has not been persisted yet
///
/// The id is assigned by the database on save.
#[derive(Debug, Clone)]
pub struct NewTeam {
    name: String,
}

impl NewTeam {
    /// Creates a new team value
    ///
    /// # Returns
    /// * `Ok(NewTeam)` - If the name is non-empty
    /// * `Err(String)` - If the name is empty
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.is_empty() {
            return Err("Team name cannot be empty".to_string());
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

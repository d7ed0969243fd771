use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::domain::member::{
    Member, MemberDto, MemberProbe, MemberSummary, MemberWithTeam, NewMember,
};
use crate::domain::paging::{Page, PageRequest};
use crate::domain::repositories::{MemberRepository, RepositoryError, RepositoryResult};
use crate::domain::team::Team;

const MEMBER_COLUMNS: &str = "id, username, age, team_id, created_at";

#[derive(FromRow)]
pub(super) struct MemberRow {
    pub(super) id: i64,
    pub(super) username: String,
    pub(super) age: i32,
    pub(super) team_id: Option<i64>,
    pub(super) created_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member::from_persistence(row.id, row.username, row.age, row.team_id, row.created_at)
    }
}

#[derive(FromRow)]
struct MemberWithTeamRow {
    id: i64,
    username: String,
    age: i32,
    team_id: Option<i64>,
    created_at: DateTime<Utc>,
    t_id: Option<i64>,
    t_name: Option<String>,
    t_created_at: Option<DateTime<Utc>>,
}

impl From<MemberWithTeamRow> for MemberWithTeam {
    fn from(row: MemberWithTeamRow) -> Self {
        let team = match (row.t_id, row.t_name, row.t_created_at) {
            (Some(id), Some(name), Some(created_at)) => {
                Some(Team::from_persistence(id, name, created_at))
            }
            _ => None,
        };

        MemberWithTeam {
            member: Member::from_persistence(
                row.id,
                row.username,
                row.age,
                row.team_id,
                row.created_at,
            ),
            team,
        }
    }
}

/// PostgreSQL implementation of MemberRepository
///
/// Each operation carries its own SQL. Paged operations issue one
/// content query and one count query; the ORDER BY column comes from the
/// whitelisted sort key, never from request text.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new PostgresMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: NewMember) -> RepositoryResult<Member> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO members (username, age, team_id)
            VALUES ($1, $2, $3)
            RETURNING id, username, age, team_id, created_at
            "#,
        )
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, member: &Member) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET username = $1, age = $2, team_id = $3
            WHERE id = $4
            "#,
        )
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .bind(member.id())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "member",
                id: member.id(),
            });
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE id = $1",
            MEMBER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members ORDER BY id",
            MEMBER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_all_paged(&self, request: &PageRequest) -> RepositoryResult<Page<Member>> {
        let sort = request.sort();
        let sql = format!(
            "SELECT {} FROM members ORDER BY {} {}, id LIMIT $1 OFFSET $2",
            MEMBER_COLUMNS,
            sort.key.as_column(),
            sort.direction.as_sql(),
        );

        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            request,
            total,
        ))
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "member",
                id,
            });
        }

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE username = $1 ORDER BY id",
            MEMBER_COLUMNS
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_optional_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE username = $1 ORDER BY id LIMIT 1",
            MEMBER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: i32,
    ) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE username = $1 AND age > $2 ORDER BY id",
            MEMBER_COLUMNS
        ))
        .bind(username)
        .bind(age)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_top3(&self) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members ORDER BY username LIMIT 3",
            MEMBER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_user(&self, username: &str, age: i32) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE username = $1 AND age = $2 ORDER BY id",
            MEMBER_COLUMNS
        ))
        .bind(username)
        .bind(age)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_username_list(&self) -> RepositoryResult<Vec<String>> {
        let usernames =
            sqlx::query_scalar::<_, String>("SELECT username FROM members ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(usernames)
    }

    async fn find_member_dto(&self) -> RepositoryResult<Vec<MemberDto>> {
        let dtos = sqlx::query_as::<_, MemberDto>(
            r#"
            SELECT m.id, m.username, t.name AS team_name
            FROM members m
            JOIN teams t ON t.id = m.team_id
            ORDER BY m.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(dtos)
    }

    async fn find_by_names(&self, names: &[String]) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE username = ANY($1) ORDER BY id",
            MEMBER_COLUMNS
        ))
        .bind(names)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_age_paged(
        &self,
        age: i32,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Member>> {
        let sort = request.sort();
        let sql = format!(
            "SELECT {} FROM members WHERE age = $1 ORDER BY {} {}, id LIMIT $2 OFFSET $3",
            MEMBER_COLUMNS,
            sort.key.as_column(),
            sort.direction.as_sql(),
        );

        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(age)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE age = $1")
            .bind(age)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            request,
            total,
        ))
    }

    async fn bulk_age_plus(&self, age: i32) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE members SET age = age + 1 WHERE age >= $1")
            .bind(age)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_with_team_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Vec<MemberWithTeam>> {
        let rows = sqlx::query_as::<_, MemberWithTeamRow>(
            r#"
            SELECT m.id, m.username, m.age, m.team_id, m.created_at,
                   t.id AS t_id, t.name AS t_name, t.created_at AS t_created_at
            FROM members m
            LEFT JOIN teams t ON t.id = m.team_id
            WHERE m.username = $1
            ORDER BY m.id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_read_only_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Option<Member>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE username = $1 ORDER BY id LIMIT 1",
            MEMBER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.map(Into::into))
    }

    async fn find_lock_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        // The row locks are released at the commit below; callers that
        // need to act under the lock do so in a single repository call.
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE username = $1 ORDER BY id FOR UPDATE",
            MEMBER_COLUMNS
        ))
        .bind(username)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_example(&self, probe: &MemberProbe) -> RepositoryResult<Vec<Member>> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT m.id, m.username, m.age, m.team_id, m.created_at FROM members m",
        );

        if probe.team_name.is_some() {
            builder.push(" JOIN teams t ON t.id = m.team_id");
        }

        builder.push(" WHERE TRUE");

        if let Some(username) = &probe.username {
            builder.push(" AND m.username = ").push_bind(username);
        }
        if let Some(age) = probe.age {
            builder.push(" AND m.age = ").push_bind(age);
        }
        if let Some(team_name) = &probe.team_name {
            builder.push(" AND t.name = ").push_bind(team_name);
        }

        builder.push(" ORDER BY m.id");

        let rows = builder
            .build_query_as::<MemberRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_summaries_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Vec<MemberSummary>> {
        let summaries = sqlx::query_as::<_, MemberSummary>(
            r#"
            SELECT m.username, t.name AS team_name
            FROM members m
            LEFT JOIN teams t ON t.id = m.team_id
            WHERE m.username = $1
            ORDER BY m.id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn find_all_dto(&self, request: &PageRequest) -> RepositoryResult<Page<MemberDto>> {
        let sort = request.sort();
        let sql = format!(
            "SELECT m.id, m.username, t.name AS team_name \
             FROM members m \
             LEFT JOIN teams t ON t.id = m.team_id \
             ORDER BY m.{} {}, m.id LIMIT $1 OFFSET $2",
            sort.key.as_column(),
            sort.direction.as_sql(),
        );

        let dtos = sqlx::query_as::<_, MemberDto>(&sql)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(dtos, request, total))
    }
}

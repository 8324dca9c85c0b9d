//! Member repository
//!
//! Names are unique; the UNIQUE constraint is the duplicate check.

use sqlx::SqlitePool;

use jpashop_core::{Address, Member, MemberName};

use super::{is_unique_violation, rows, DbError};

/// Member repository
pub struct MemberRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MemberRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a member.
    ///
    /// Returns `DbError::Conflict` when the name is taken.
    pub async fn save(&self, name: &MemberName, address: Option<&Address>) -> Result<Member, DbError> {
        let result = sqlx::query(
            "INSERT INTO member (name, city, street, zipcode) VALUES (?, ?, ?, ?)",
        )
        .bind(name.as_str())
        .bind(address.map(|a| a.city.as_str()))
        .bind(address.map(|a| a.street.as_str()))
        .bind(address.map(|a| a.zipcode.as_str()))
        .execute(self.pool)
        .await
        .map_err(|e| name_conflict(e, name))?;

        Ok(Member {
            id: result.last_insert_rowid(),
            name: name.as_str().to_owned(),
            address: address.cloned(),
        })
    }

    /// Get a single member by id.
    pub async fn find_one(&self, id: i64) -> Result<Member, DbError> {
        let row = sqlx::query(concat!(
            "SELECT ",
            member_columns!(),
            " FROM member m WHERE m.member_id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("member", id))?;

        Ok(rows::member(&row)?)
    }

    /// All members in id order.
    pub async fn find_all(&self) -> Result<Vec<Member>, DbError> {
        let records = sqlx::query(concat!(
            "SELECT ",
            member_columns!(),
            " FROM member m ORDER BY m.member_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(records.iter().map(rows::member).collect::<Result<_, _>>()?)
    }

    /// Members with exactly this name (zero or one, given the constraint).
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Member>, DbError> {
        let records = sqlx::query(concat!(
            "SELECT ",
            member_columns!(),
            " FROM member m WHERE m.name = ? ORDER BY m.member_id"
        ))
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(records.iter().map(rows::member).collect::<Result<_, _>>()?)
    }

    /// Rename a member.
    pub async fn update_name(&self, id: i64, name: &MemberName) -> Result<Member, DbError> {
        let result = sqlx::query("UPDATE member SET name = ? WHERE member_id = ?")
            .bind(name.as_str())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| name_conflict(e, name))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("member", id));
        }

        self.find_one(id).await
    }
}

fn name_conflict(err: sqlx::Error, name: &MemberName) -> DbError {
    if is_unique_violation(&err) {
        DbError::Conflict {
            resource: "member",
            id: name.as_str().to_owned(),
            reason: "name already registered",
        }
    } else {
        DbError::Sqlx(err)
    }
}

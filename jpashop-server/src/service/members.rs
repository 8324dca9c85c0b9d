use sqlx::SqlitePool;

use jpashop_core::{Address, Member, MemberName, ShopError};

use super::ServiceResult;
use crate::db::{DbError, MemberRepo};

/// Member registration and lookup
pub struct MemberService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MemberService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a member. Names are unique.
    pub async fn join(&self, name: MemberName, address: Option<Address>) -> ServiceResult<i64> {
        let repo = MemberRepo::new(self.pool);

        if !repo.find_by_name(name.as_str()).await?.is_empty() {
            return Err(ShopError::duplicate_member(name.into_string()).into());
        }

        // Two concurrent joins can both pass the lookup; the UNIQUE
        // constraint turns the loser into a conflict.
        let saved = repo.save(&name, address.as_ref()).await;
        match saved {
            Ok(member) => {
                tracing::info!(member_id = member.id, name = %member.name, "member joined");
                Ok(member.id)
            }
            Err(DbError::Conflict { .. }) => {
                Err(ShopError::duplicate_member(name.into_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_members(&self) -> ServiceResult<Vec<Member>> {
        Ok(MemberRepo::new(self.pool).find_all().await?)
    }

    pub async fn find_one(&self, id: i64) -> ServiceResult<Member> {
        Ok(MemberRepo::new(self.pool).find_one(id).await?)
    }

    /// Rename a member.
    pub async fn update(&self, id: i64, name: MemberName) -> ServiceResult<Member> {
        let updated = MemberRepo::new(self.pool).update_name(id, &name).await;
        match updated {
            Ok(member) => Ok(member),
            Err(DbError::Conflict { .. }) => {
                Err(ShopError::duplicate_member(name.into_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

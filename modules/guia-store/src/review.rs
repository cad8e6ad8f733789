use anyhow::Result;
use chrono::{DateTime, Utc};
use guia_common::ReviewInput;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub user_id: Option<Uuid>,
    pub content: String,
    pub rating: i32,
    pub sentiment: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Store an unverified review. Returns `None` when the venue does not
    /// exist or is inactive.
    pub async fn create(input: &ReviewInput, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO reviews (id, venue_id, content, rating)
            SELECT $1, v.id, $3, $4 FROM venues v WHERE v.id = $2 AND v.is_active
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.venue_id)
        .bind(input.content.trim())
        .bind(input.rating)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_for_venue(venue_id: Uuid, pool: &PgPool) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews WHERE venue_id = $1")
            .bind(venue_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn delete_all<'e>(executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reviews").execute(executor).await?;
        Ok(result.rows_affected())
    }
}

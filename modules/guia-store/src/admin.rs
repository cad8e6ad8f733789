use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::review::Review;
use crate::venue::Venue;
use crate::zone::ZoneRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetSummary {
    pub deleted_reviews: u64,
    pub deleted_venues: u64,
    pub deleted_zones: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub venues: i64,
    pub reviews: i64,
    pub zones: i64,
    pub zones_list: Vec<ZoneSummary>,
}

/// Delete reviews, venues and zones in one transaction, children first.
pub async fn reset_database(pool: &PgPool) -> Result<ResetSummary> {
    let mut tx = pool.begin().await?;
    let deleted_reviews = Review::delete_all(&mut *tx).await?;
    let deleted_venues = Venue::delete_all(&mut *tx).await?;
    let deleted_zones = ZoneRecord::delete_all(&mut *tx).await?;
    tx.commit().await?;

    info!(deleted_reviews, deleted_venues, deleted_zones, "Database reset");

    Ok(ResetSummary {
        deleted_reviews,
        deleted_venues,
        deleted_zones,
    })
}

pub async fn database_status(pool: &PgPool) -> Result<DatabaseStatus> {
    let zones_list = ZoneRecord::list(pool)
        .await?
        .into_iter()
        .map(|z| ZoneSummary {
            id: z.id,
            name: z.name,
        })
        .collect();

    Ok(DatabaseStatus {
        venues: Venue::count(pool).await?,
        reviews: Review::count(pool).await?,
        zones: ZoneRecord::count(pool).await?,
        zones_list,
    })
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use guia_zones::ZoneCatalog;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// A zone row. The catalog in memory is authoritative for assignment; this
/// table mirrors it for listing and status.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    pub id: Uuid,
    pub name: String,
    pub geo_json: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl ZoneRecord {
    /// Insert every catalog zone not already stored by name. Returns the
    /// number of new rows.
    pub async fn create_many(catalog: &ZoneCatalog, pool: &PgPool) -> Result<u64> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;
        for zone in catalog.iter() {
            inserted += sqlx::query(
                r#"
                INSERT INTO zones (id, name, latitude, longitude)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&zone.name)
            .bind(zone.centroid.latitude)
            .bind(zone.centroid.longitude)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM zones ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM zones")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn delete_all<'e>(executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM zones").execute(executor).await?;
        Ok(result.rows_affected())
    }
}

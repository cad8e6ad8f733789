use anyhow::Result;
use chrono::{DateTime, Utc};
use guia_common::{Page, VenueFilters};
use guia_zones::{Coordinate, Placed};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Active-or-not venue row joined with its review count.
const VIEW_SELECT: &str = r#"
    SELECT v.*, (SELECT COUNT(*) FROM reviews r WHERE r.venue_id = v.id) AS review_count
    FROM venues v
"#;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: Option<String>,
    pub zone: Option<String>,
    pub price_range: Option<f64>,
    pub score: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A venue as the API presents it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VenueView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub venue: Venue,
    pub review_count: i64,
}

/// Fields for inserting a venue; ids and timestamps come from the database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVenue {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: Option<String>,
    pub zone: Option<String>,
    pub price_range: Option<f64>,
    pub score: f64,
}

impl NewVenue {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

impl Placed for Venue {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_raw(self.latitude, self.longitude)
    }

    fn zone_label(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Placed for VenueView {
    fn coordinate(&self) -> Option<Coordinate> {
        self.venue.coordinate()
    }

    fn zone_label(&self) -> Option<&str> {
        self.venue.zone_label()
    }

    fn display_name(&self) -> &str {
        &self.venue.name
    }
}

impl Placed for NewVenue {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_raw(self.latitude, self.longitude)
    }

    fn zone_label(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Venue {
    pub async fn create(new: &NewVenue, pool: &PgPool) -> Result<Self> {
        insert(new).fetch_one(pool).await.map_err(Into::into)
    }

    /// Insert a batch in one transaction. Returns the number of rows written.
    pub async fn insert_many(venues: &[NewVenue], pool: &PgPool) -> Result<usize> {
        let mut tx = pool.begin().await?;
        for new in venues {
            insert(new).fetch_one(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(venues.len())
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Existing venue with the same case-insensitive name and zone label.
    pub async fn find_by_name_and_zone(
        name: &str,
        zone: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM venues WHERE LOWER(name) = LOWER($1) AND zone IS NOT DISTINCT FROM $2 LIMIT 1",
        )
        .bind(name)
        .bind(zone)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn all_active(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM venues WHERE is_active ORDER BY created_at, id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn update_zone(id: Uuid, zone: &str, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE venues SET zone = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(zone)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Write many zone labels in one transaction.
    pub async fn update_zones(labels: &[(Uuid, String)], pool: &PgPool) -> Result<usize> {
        let mut tx = pool.begin().await?;
        let mut updated = 0;
        for (id, zone) in labels {
            let result = sqlx::query("UPDATE venues SET zone = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(zone)
                .execute(&mut *tx)
                .await?;
            updated += result.rows_affected() as usize;
        }
        tx.commit().await?;
        Ok(updated)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn delete_all<'e>(executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM venues").execute(executor).await?;
        Ok(result.rows_affected())
    }
}

impl VenueView {
    pub async fn find_active(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(&format!("{VIEW_SELECT} WHERE v.id = $1 AND v.is_active"))
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Active venues, best score first, with optional exact zone/category filters.
    pub async fn list_active(filters: &VenueFilters, page: Page, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(&format!(
            r#"{VIEW_SELECT}
            WHERE v.is_active
              AND ($1::text IS NULL OR v.zone = $1)
              AND ($2::text IS NULL OR v.category = $2)
            ORDER BY v.score DESC, v.name
            LIMIT $3 OFFSET $4"#
        ))
        .bind(filters.zone.as_deref())
        .bind(filters.category.as_deref())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Top active venues by score, optionally restricted to one zone label.
    pub async fn top_active(limit: i64, zone: Option<&str>, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(&format!(
            r#"{VIEW_SELECT}
            WHERE v.is_active AND ($1::text IS NULL OR v.zone = $1)
            ORDER BY v.score DESC, v.name
            LIMIT $2"#
        ))
        .bind(zone)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Top active venues whose zone contains `keyword`, case-insensitively.
    pub async fn top_matching_zone(
        keyword: Option<&str>,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(&format!(
            r#"{VIEW_SELECT}
            WHERE v.is_active
              AND ($1::text IS NULL OR LOWER(v.zone) LIKE '%' || LOWER($1) || '%')
            ORDER BY v.score DESC, v.name
            LIMIT $2"#
        ))
        .bind(keyword)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Distinct non-empty zone labels among active venues.
    pub async fn active_zones(pool: &PgPool) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT zone FROM venues WHERE is_active AND zone IS NOT NULL AND zone <> '' ORDER BY zone",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(z,)| z).collect())
    }
}

fn insert(
    new: &NewVenue,
) -> sqlx::query::QueryAs<'_, sqlx::Postgres, Venue, sqlx::postgres::PgArguments> {
    sqlx::query_as::<_, Venue>(
        r#"
        INSERT INTO venues (id, name, address, description, phone, website, latitude, longitude,
                            category, zone, price_range, score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.name)
    .bind(&new.address)
    .bind(&new.description)
    .bind(&new.phone)
    .bind(&new.website)
    .bind(new.latitude)
    .bind(new.longitude)
    .bind(&new.category)
    .bind(&new.zone)
    .bind(new.price_range)
    .bind(new.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_coordinates_count_as_missing() {
        let venue = NewVenue::new("Sin ubicación", "Huelva").at(0.0, 0.0);
        assert!(venue.coordinate().is_none());

        let venue = NewVenue::new("Azabache", "Calle Vázquez López, 22").at(37.2574, -6.9501);
        assert_eq!(venue.coordinate().map(|c| c.latitude), Some(37.2574));
    }

    #[test]
    fn builder_sets_fields() {
        let venue = NewVenue::new("Bar La Marina", "Puerto Deportivo")
            .category("Bar")
            .zone("Isla Cristina")
            .description("Vistas al puerto")
            .score(8.0);
        assert_eq!(venue.category.as_deref(), Some("Bar"));
        assert_eq!(venue.zone_label(), Some("Isla Cristina"));
        assert_eq!(venue.description.as_deref(), Some("Vistas al puerto"));
        assert_eq!(venue.score, 8.0);
    }
}

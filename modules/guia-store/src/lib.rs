//! Postgres persistence for venues, reviews and zones.

pub mod admin;
pub mod ranking;
pub mod review;
pub mod seed;
pub mod venue;
pub mod zone;

pub use admin::{database_status, reset_database, DatabaseStatus, ResetSummary, ZoneSummary};
pub use ranking::Ranking;
pub use review::Review;
pub use seed::{seed_demo, SeedSummary};
pub use venue::{NewVenue, Venue, VenueView};
pub use zone::ZoneRecord;

use sqlx::PgPool;

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

use crate::venue::VenueView;

pub const DEFAULT_TOP: i64 = 50;
pub const MAX_TOP: i64 = 500;

/// Best-scored active venues, overall and per zone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub global_ranking: Vec<VenueView>,
    pub ranking_by_zone: BTreeMap<String, Vec<VenueView>>,
}

impl Ranking {
    pub async fn compute(top: Option<i64>, pool: &PgPool) -> Result<Self> {
        let top = top.unwrap_or(DEFAULT_TOP).clamp(1, MAX_TOP);

        let global_ranking = VenueView::top_active(top, None, pool).await?;

        let mut ranking_by_zone = BTreeMap::new();
        for zone in VenueView::active_zones(pool).await? {
            let venues = VenueView::top_active(top, Some(&zone), pool).await?;
            ranking_by_zone.insert(zone, venues);
        }

        Ok(Self {
            global_ranking,
            ranking_by_zone,
        })
    }
}

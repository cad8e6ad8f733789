//! Bulk import of places into the venue directory.

use anyhow::Result;
use guia_common::ImportSummary;
use guia_store::{NewVenue, Venue};
use guia_zones::{DistanceMetric, ZoneAssigner};
use places_client::PlaceCandidate;
use sqlx::PgPool;
use tracing::info;

pub const IMPORT_DESCRIPTION: &str = "Importado desde Google Places";

pub fn to_new_venue(candidate: PlaceCandidate) -> NewVenue {
    NewVenue {
        name: candidate.name,
        address: candidate.address,
        description: Some(IMPORT_DESCRIPTION.to_string()),
        phone: candidate.phone,
        website: candidate.website,
        latitude: Some(candidate.latitude),
        longitude: Some(candidate.longitude),
        category: Some(candidate.category),
        zone: None,
        price_range: None,
        score: candidate.rating,
    }
}

/// Convert candidates and label each with its zone. Returns the venues and
/// how many landed in a real zone.
pub fn label_candidates<M: DistanceMetric>(
    candidates: Vec<PlaceCandidate>,
    assigner: &ZoneAssigner<M>,
) -> (Vec<NewVenue>, usize) {
    let mut venues: Vec<NewVenue> = candidates.into_iter().map(to_new_venue).collect();
    let assignments = assigner.assign_all(&venues);

    let mut assigned = 0;
    for (venue, assignment) in venues.iter_mut().zip(assignments) {
        if assignment.is_assigned() {
            assigned += 1;
        }
        venue.zone = Some(assignment.label().to_string());
    }
    (venues, assigned)
}

/// Label, de-duplicate against stored venues, and insert the rest in one
/// transaction.
pub async fn import_candidates<M: DistanceMetric>(
    candidates: Vec<PlaceCandidate>,
    assigner: &ZoneAssigner<M>,
    pool: &PgPool,
) -> Result<ImportSummary> {
    let total_found = candidates.len();
    let (labelled, zones_assigned) = label_candidates(candidates, assigner);

    let mut fresh = Vec::new();
    for venue in labelled {
        let existing = Venue::find_by_name_and_zone(&venue.name, venue.zone.as_deref(), pool).await?;
        if existing.is_none() {
            fresh.push(venue);
        }
    }

    let new_added = Venue::insert_many(&fresh, pool).await?;
    let summary = ImportSummary {
        total_found,
        new_added,
        duplicates: total_found - new_added,
        zones_assigned,
    };

    info!(
        total_found,
        new_added,
        duplicates = summary.duplicates,
        zones_assigned,
        "Places import finished"
    );
    Ok(summary)
}

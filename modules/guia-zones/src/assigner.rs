use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::ZoneCatalog;
use crate::geo::{Coordinate, DistanceMetric, Haversine};

/// Label stored for venues that matched no zone.
pub const UNASSIGNED_ZONE: &str = "unassigned";

/// A usable search radius: finite and not negative.
pub fn is_valid_radius(km: f64) -> bool {
    km.is_finite() && km >= 0.0
}

/// Anything with an optional position and an optional stored zone label.
pub trait Placed {
    fn coordinate(&self) -> Option<Coordinate>;

    fn zone_label(&self) -> Option<&str> {
        None
    }

    /// Used only for log lines.
    fn display_name(&self) -> &str {
        ""
    }
}

impl<T: Placed + ?Sized> Placed for &T {
    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }

    fn zone_label(&self) -> Option<&str> {
        (**self).zone_label()
    }

    fn display_name(&self) -> &str {
        (**self).display_name()
    }
}

impl Placed for Coordinate {
    fn coordinate(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

impl Placed for Option<Coordinate> {
    fn coordinate(&self) -> Option<Coordinate> {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnassignedReason {
    MissingCoordinates,
    OutOfRange { nearest: String, distance_km: f64 },
    NoZones,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ZoneAssignment {
    Assigned { zone: String, distance_km: f64 },
    Unassigned(UnassignedReason),
}

impl ZoneAssignment {
    /// The zone name, or [`UNASSIGNED_ZONE`].
    pub fn label(&self) -> &str {
        match self {
            ZoneAssignment::Assigned { zone, .. } => zone,
            ZoneAssignment::Unassigned(_) => UNASSIGNED_ZONE,
        }
    }

    pub fn zone(&self) -> Option<&str> {
        match self {
            ZoneAssignment::Assigned { zone, .. } => Some(zone),
            ZoneAssignment::Unassigned(_) => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, ZoneAssignment::Assigned { .. })
    }
}

/// Venue counts per zone name, including the `unassigned` bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ZoneDistribution(BTreeMap<String, usize>);

impl ZoneDistribution {
    pub fn get(&self, zone: &str) -> Option<usize> {
        self.0.get(zone).copied()
    }

    pub fn unassigned(&self) -> usize {
        self.0.get(UNASSIGNED_ZONE).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, usize> {
        self.0
    }
}

/// Nearest-centroid zone lookup with a radius cutoff.
#[derive(Debug, Clone)]
pub struct ZoneAssigner<M = Haversine> {
    catalog: Arc<ZoneCatalog>,
    max_radius_km: f64,
    metric: M,
}

impl ZoneAssigner<Haversine> {
    pub fn new(catalog: Arc<ZoneCatalog>, max_radius_km: f64) -> Self {
        Self::with_metric(catalog, max_radius_km, Haversine)
    }
}

impl<M: DistanceMetric> ZoneAssigner<M> {
    pub fn with_metric(catalog: Arc<ZoneCatalog>, max_radius_km: f64, metric: M) -> Self {
        Self {
            catalog,
            max_radius_km,
            metric,
        }
    }

    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    pub fn max_radius_km(&self) -> f64 {
        self.max_radius_km
    }

    /// Pick the closest zone centroid within `max_radius_km`.
    ///
    /// Ties keep the zone seen first in catalog order.
    pub fn assign_zone<P: Placed + ?Sized>(&self, venue: &P) -> ZoneAssignment {
        let Some(point) = venue.coordinate() else {
            warn!(venue = venue.display_name(), "No coordinates, leaving unassigned");
            return ZoneAssignment::Unassigned(UnassignedReason::MissingCoordinates);
        };

        let mut best: Option<(&str, f64)> = None;
        for zone in self.catalog.iter() {
            let distance = self.metric.distance_km(point, zone.centroid);
            match best {
                Some((_, min)) if distance >= min => {}
                _ => best = Some((zone.name.as_str(), distance)),
            }
        }

        let Some((nearest, distance_km)) = best else {
            return ZoneAssignment::Unassigned(UnassignedReason::NoZones);
        };

        if distance_km <= self.max_radius_km {
            debug!(venue = venue.display_name(), zone = nearest, distance_km, "Zone assigned");
            ZoneAssignment::Assigned {
                zone: nearest.to_string(),
                distance_km,
            }
        } else {
            warn!(
                venue = venue.display_name(),
                nearest,
                distance_km,
                max_radius_km = self.max_radius_km,
                "Too far from every zone, leaving unassigned"
            );
            ZoneAssignment::Unassigned(UnassignedReason::OutOfRange {
                nearest: nearest.to_string(),
                distance_km,
            })
        }
    }

    /// Assign every venue, preserving input order.
    pub fn assign_all<I>(&self, venues: I) -> Vec<ZoneAssignment>
    where
        I: IntoIterator,
        I::Item: Placed,
    {
        venues.into_iter().map(|v| self.assign_zone(&v)).collect()
    }

    /// Number of venues that land in a real zone.
    pub fn assign_zones_to_venues<I>(&self, venues: I) -> usize
    where
        I: IntoIterator,
        I::Item: Placed,
    {
        venues
            .into_iter()
            .filter(|v| self.assign_zone(v).is_assigned())
            .count()
    }

    /// Count venues per stored zone label. Labels outside the catalog count as unassigned.
    pub fn zone_distribution<I>(&self, venues: I) -> ZoneDistribution
    where
        I: IntoIterator,
        I::Item: Placed,
    {
        let mut counts: BTreeMap<String, usize> = self
            .catalog
            .names()
            .map(|name| (name.to_string(), 0))
            .collect();
        counts.insert(UNASSIGNED_ZONE.to_string(), 0);

        for venue in venues {
            let bucket = match venue.zone_label() {
                Some(label) if self.catalog.contains(label) => label,
                _ => UNASSIGNED_ZONE,
            };
            if let Some(count) = counts.get_mut(bucket) {
                *count += 1;
            }
        }

        ZoneDistribution(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ZoneProfile;

    fn capital() -> ZoneAssigner {
        ZoneAssigner::new(Arc::new(ZoneCatalog::from_profile(ZoneProfile::HuelvaCapital)), 2.0)
    }

    fn point(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn radius_must_be_finite_and_non_negative() {
        assert!(is_valid_radius(0.0));
        assert!(is_valid_radius(2.0));
        assert!(!is_valid_radius(f64::NAN));
        assert!(!is_valid_radius(f64::INFINITY));
        assert!(!is_valid_radius(-0.5));
    }

    #[test]
    fn venue_on_a_centroid_gets_that_zone() {
        let assigner = capital();
        for zone in assigner.catalog().iter() {
            let result = assigner.assign_zone(&zone.centroid);
            assert_eq!(
                result,
                ZoneAssignment::Assigned {
                    zone: zone.name.clone(),
                    distance_km: 0.0
                }
            );
        }
    }

    #[test]
    fn far_venue_is_out_of_range() {
        let assigner = capital();
        // Isla Cristina, ~33 km west of the city.
        let result = assigner.assign_zone(&point(37.1986, -7.3183));
        match &result {
            ZoneAssignment::Unassigned(UnassignedReason::OutOfRange { distance_km, .. }) => {
                assert!(*distance_km > 2.0);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
        assert_eq!(result.label(), UNASSIGNED_ZONE);
    }

    #[test]
    fn missing_coordinate_is_unassigned() {
        let result = capital().assign_zone(&None::<Coordinate>);
        assert_eq!(
            result,
            ZoneAssignment::Unassigned(UnassignedReason::MissingCoordinates)
        );
    }

    #[test]
    fn empty_catalog_leaves_everything_unassigned() {
        let assigner = ZoneAssigner::new(Arc::new(ZoneCatalog::default()), 2.0);
        assert_eq!(
            assigner.assign_zone(&point(37.2571, -6.9406)),
            ZoneAssignment::Unassigned(UnassignedReason::NoZones)
        );
    }

    #[test]
    fn ties_go_to_the_first_zone_in_catalog_order() {
        let catalog = ZoneCatalog::from_entries([
            ("Norte", 10.5, 20.0),
            ("Sur", 9.5, 20.0),
        ])
        .unwrap();
        let assigner = ZoneAssigner::new(Arc::new(catalog), 100.0);
        let midpoint = point(10.0, 20.0);
        let result = assigner.assign_zone(&midpoint);
        // Equal latitude offsets give identical distances on the same meridian.
        assert_eq!(result.zone(), Some("Norte"));
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let catalog = ZoneCatalog::from_entries([("Centro", 37.2571, -6.9406)]).unwrap();
        let venue = point(37.2574, -6.9501);
        let exact = crate::geo::distance_km(venue, catalog.get("Centro").unwrap().centroid);
        let assigner = ZoneAssigner::new(Arc::new(catalog), exact);
        assert!(assigner.assign_zone(&venue).is_assigned());
    }
}

//! Zone assignment for venue coordinates.
//!
//! A fixed [`ZoneCatalog`] of centroids is loaded once; [`ZoneAssigner`] picks
//! the nearest centroid within a radius using Haversine distance. Everything
//! here is pure and freely shareable across threads.

pub mod assigner;
pub mod catalog;
pub mod error;
pub mod geo;

pub use assigner::{
    is_valid_radius, Placed, UnassignedReason, ZoneAssigner, ZoneAssignment, ZoneDistribution, UNASSIGNED_ZONE,
};
pub use catalog::{ZoneCatalog, ZoneDefinition, ZoneProfile};
pub use error::{Result, ZoneError};
pub use geo::{distance_km, Coordinate, DistanceMetric, Haversine, EARTH_RADIUS_KM};

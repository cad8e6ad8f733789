use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneError};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = (-90.0..=90.0).contains(&latitude);
        let lng_ok = (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lng_ok {
            return Err(ZoneError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Interpret a raw stored/imported pair.
    ///
    /// A missing component, the `(0, 0)` placeholder, or an out-of-range pair
    /// all mean "no usable coordinate".
    pub fn from_raw(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        let (lat, lng) = (latitude?, longitude?);
        if lat == 0.0 && lng == 0.0 {
            return None;
        }
        Self::new(lat, lng).ok()
    }
}

/// Great-circle distance in kilometers (Haversine).
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Distance function used by the assigner's nearest-centroid scan.
pub trait DistanceMetric: Send + Sync {
    fn distance_km(&self, a: Coordinate, b: Coordinate) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance_km(&self, a: Coordinate, b: Coordinate) -> f64 {
        distance_km(a, b)
    }
}

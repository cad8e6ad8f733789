use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, ZoneError};
use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneDefinition {
    pub name: String,
    pub centroid: Coordinate,
}

/// Immutable table of zone centroids.
///
/// Iteration follows construction order; the assigner's tie-break relies on it.
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    zones: Vec<ZoneDefinition>,
    index: HashMap<String, usize>,
}

impl ZoneCatalog {
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        let mut zones = Vec::new();
        let mut index = HashMap::new();

        for (name, latitude, longitude) in entries {
            let name = name.into();
            let centroid = Coordinate::new(latitude, longitude)?;
            if index.contains_key(&name) {
                return Err(ZoneError::DuplicateZone(name));
            }
            index.insert(name.clone(), zones.len());
            zones.push(ZoneDefinition { name, centroid });
        }

        Ok(Self { zones, index })
    }

    pub fn from_profile(profile: ZoneProfile) -> Self {
        // Built-in tables are static and validated by tests.
        Self::from_entries(profile.entries().iter().copied()).unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&ZoneDefinition> {
        self.index.get(name).map(|&i| &self.zones[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneDefinition> {
        self.zones.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(|z| z.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Named built-in catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneProfile {
    /// The 17 neighbourhoods of Huelva city.
    HuelvaCapital,
    /// Five coastal/provincial areas used by the demo dataset.
    Provincia,
}

impl ZoneProfile {
    pub fn entries(self) -> &'static [(&'static str, f64, f64)] {
        match self {
            ZoneProfile::HuelvaCapital => HUELVA_CAPITAL,
            ZoneProfile::Provincia => PROVINCIA,
        }
    }
}

impl fmt::Display for ZoneProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneProfile::HuelvaCapital => write!(f, "huelva-capital"),
            ZoneProfile::Provincia => write!(f, "provincia"),
        }
    }
}

impl FromStr for ZoneProfile {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "huelva-capital" | "huelva_capital" | "capital" => Ok(ZoneProfile::HuelvaCapital),
            "provincia" => Ok(ZoneProfile::Provincia),
            other => Err(ZoneError::UnknownProfile(other.to_string())),
        }
    }
}

const HUELVA_CAPITAL: &[(&str, f64, f64)] = &[
    ("Nuevo Parque, Los Rosales, Tráfico Pesado", 37.2610, -6.9380),
    ("Marismas del Polvorín", 37.2540, -6.9450),
    ("Pescadería", 37.2550, -6.9400),
    ("Centro", 37.2571, -6.9406),
    ("Reina Victoria, Matadero", 37.2620, -6.9350),
    ("Isla Chica", 37.2530, -6.9380),
    ("Las Torres, Guadalupe", 37.2680, -6.9300),
    ("Fuentepiña", 37.2700, -6.9250),
    ("La Florida, Vistalegre", 37.2750, -6.9200),
    ("La Hispanidad, Verdeluz", 37.2700, -6.9400),
    ("Tres Ventanas", 37.2650, -6.9450),
    ("El Conquero", 37.2600, -6.9500),
    ("Molino de la Vega", 37.2580, -6.9320),
    ("Las Colonias", 37.2630, -6.9250),
    ("El Carmen, Cardeñas", 37.2550, -6.9320),
    ("La Orden", 37.2500, -6.9350),
    ("San Antonio", 37.2520, -6.9500),
];

const PROVINCIA: &[(&str, f64, f64)] = &[
    ("Centro", 37.2574, -6.9502),
    ("Molinos", 37.2625, -6.9455),
    ("Isla Cristina", 37.2003, -7.3192),
    ("Punta Umbría", 37.1810, -6.9675),
    ("El Rompido", 37.2150, -7.1350),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_are_valid() {
        for profile in [ZoneProfile::HuelvaCapital, ZoneProfile::Provincia] {
            let catalog = ZoneCatalog::from_entries(profile.entries().iter().copied()).unwrap();
            assert_eq!(catalog.len(), profile.entries().len());
        }
        assert_eq!(ZoneCatalog::from_profile(ZoneProfile::HuelvaCapital).len(), 17);
        assert_eq!(ZoneCatalog::from_profile(ZoneProfile::Provincia).len(), 5);
    }

    #[test]
    fn lookup_by_name() {
        let catalog = ZoneCatalog::from_profile(ZoneProfile::HuelvaCapital);
        let centro = catalog.get("Centro").unwrap();
        assert_eq!(centro.centroid.latitude, 37.2571);
        assert!(catalog.get("Otras").is_none());
        assert!(catalog.contains("San Antonio"));
    }

    #[test]
    fn iteration_keeps_construction_order() {
        let catalog =
            ZoneCatalog::from_entries([("b", 1.0, 1.0), ("a", 2.0, 2.0), ("c", 3.0, 3.0)]).unwrap();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ZoneCatalog::from_entries([("Centro", 1.0, 1.0), ("Centro", 2.0, 2.0)])
            .unwrap_err();
        assert_eq!(err, ZoneError::DuplicateZone("Centro".to_string()));
    }

    #[test]
    fn invalid_centroid_is_rejected() {
        let err = ZoneCatalog::from_entries([("Nowhere", 95.0, 1.0)]).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidCoordinate { .. }));
    }

    #[test]
    fn profile_names_parse() {
        assert_eq!("huelva-capital".parse::<ZoneProfile>().unwrap(), ZoneProfile::HuelvaCapital);
        assert_eq!(" Provincia ".parse::<ZoneProfile>().unwrap(), ZoneProfile::Provincia);
        assert!("sevilla".parse::<ZoneProfile>().is_err());
        assert_eq!(ZoneProfile::Provincia.to_string(), "provincia");
    }
}

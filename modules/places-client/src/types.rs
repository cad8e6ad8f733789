use serde::Deserialize;

pub const ADDRESS_UNAVAILABLE: &str = "Dirección no disponible";

// --- Text Search wire format ---

#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TextSearchResponse {
    /// `OK` and `ZERO_RESULTS` are the only statuses worth continuing on.
    /// A response without a status is treated as successful.
    pub fn is_success(&self) -> bool {
        matches!(self.status.as_deref(), None | Some("OK") | Some("ZERO_RESULTS"))
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    pub name: Option<String>,
    pub geometry: Option<Geometry>,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

// --- Normalised output ---

/// A place worth importing: it has a name and a position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
    pub rating: f64,
}

impl PlaceResult {
    /// `None` when the name is blank or the location is missing.
    pub fn into_candidate(self) -> Option<PlaceCandidate> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let location = self.geometry.and_then(|g| g.location)?;

        let category = self
            .types
            .iter()
            .map(String::as_str)
            .find(|t| KNOWN_TYPES.contains(t))
            .unwrap_or("restaurant");

        Some(PlaceCandidate {
            name,
            address: self
                .vicinity
                .or(self.formatted_address)
                .unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string()),
            phone: self.formatted_phone_number,
            website: self.website,
            latitude: location.lat,
            longitude: location.lng,
            category: normalize_category(category).to_string(),
            rating: self.rating.unwrap_or(0.0),
        })
    }
}

const KNOWN_TYPES: &[&str] = &[
    "restaurant", "cafe", "bar", "tapas", "bistro", "pizzeria", "panaderia", "bakery",
];

/// Spanish display category for a Places type.
pub fn normalize_category(place_type: &str) -> &'static str {
    match place_type {
        "restaurant" => "Restaurante",
        "cafe" => "Café",
        "bar" => "Bar",
        "tapas" => "Tapería",
        "bistro" => "Bistró",
        "pizzeria" => "Pizzería",
        "panaderia" | "bakery" => "Panadería",
        _ => "Establecimiento",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> TextSearchResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn full_result_becomes_candidate() {
        let response = parse(json!({
            "status": "OK",
            "results": [{
                "name": "Bar La Marina",
                "geometry": {"location": {"lat": 37.2020, "lng": -7.3200}},
                "formatted_address": "Puerto Deportivo, Isla Cristina",
                "rating": 4.4,
                "types": ["point_of_interest", "bar", "food"]
            }]
        }));
        assert!(response.is_success());

        let candidate = response.results.into_iter().next().unwrap().into_candidate().unwrap();
        assert_eq!(candidate.name, "Bar La Marina");
        assert_eq!(candidate.address, "Puerto Deportivo, Isla Cristina");
        assert_eq!(candidate.category, "Bar");
        assert_eq!(candidate.rating, 4.4);
        assert_eq!((candidate.latitude, candidate.longitude), (37.2020, -7.3200));
    }

    #[test]
    fn incomplete_results_are_skipped() {
        let response = parse(json!({
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 37.0, "lng": -6.9}}},
                {"name": "Sin geometría"},
                {"name": "   ", "geometry": {"location": {"lat": 37.0, "lng": -6.9}}},
                {"name": "Sin ubicación", "geometry": {}}
            ]
        }));
        assert!(response
            .results
            .into_iter()
            .all(|r| r.into_candidate().is_none()));
    }

    #[test]
    fn missing_optional_fields_get_defaults() {
        let result: PlaceResult = serde_json::from_value(json!({
            "name": "Casa Rufino",
            "geometry": {"location": {"lat": 37.1986, "lng": -7.3183}}
        }))
        .unwrap();
        let candidate = result.into_candidate().unwrap();
        assert_eq!(candidate.address, ADDRESS_UNAVAILABLE);
        assert_eq!(candidate.category, "Restaurante");
        assert_eq!(candidate.rating, 0.0);
        assert!(candidate.phone.is_none());
    }

    #[test]
    fn error_statuses_are_not_success() {
        assert!(parse(json!({"status": "ZERO_RESULTS"})).is_success());
        assert!(!parse(json!({"status": "REQUEST_DENIED", "error_message": "bad key"})).is_success());
        assert!(!parse(json!({"status": "OVER_QUERY_LIMIT"})).is_success());
    }

    #[test]
    fn categories_are_spanish() {
        assert_eq!(normalize_category("cafe"), "Café");
        assert_eq!(normalize_category("pizzeria"), "Pizzería");
        assert_eq!(normalize_category("night_club"), "Establecimiento");
    }
}

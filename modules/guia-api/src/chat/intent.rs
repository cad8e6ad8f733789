use guia_common::Intent;
use guia_zones::ZoneCatalog;

const RULES: &[(Intent, &[&str])] = &[
    (Intent::Recommendation, &["recomendar", "sugerir", "mejor"]),
    (Intent::Location, &["donde", "dónde", "ubicación"]),
    (Intent::Price, &["precio", "caro", "barato"]),
    (Intent::Hours, &["horario", "abierto"]),
];

/// First matching keyword rule wins; anything else is `General`.
pub fn extract_intent(message: &str) -> Intent {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}

/// Lower-cased zone keywords in catalog order. A name like
/// "Pescadería, Tres Ventanas" yields one keyword per part.
pub fn zone_keywords(catalog: &ZoneCatalog) -> Vec<String> {
    catalog
        .names()
        .flat_map(|name| name.split(','))
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

/// The first keyword contained in the message.
pub fn mentioned_zone<'a>(message: &str, keywords: &'a [String]) -> Option<&'a str> {
    let lower = message.to_lowercase();
    keywords
        .iter()
        .find(|k| lower.contains(k.as_str()))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guia_zones::ZoneProfile;

    #[test]
    fn intent_rules_in_priority_order() {
        assert_eq!(extract_intent("¿Me puedes recomendar algo?"), Intent::Recommendation);
        assert_eq!(extract_intent("¿Dónde está Casa Rufino?"), Intent::Location);
        assert_eq!(extract_intent("¿Es caro?"), Intent::Price);
        assert_eq!(extract_intent("¿Está abierto el lunes?"), Intent::Hours);
        assert_eq!(extract_intent("Hola"), Intent::General);
        // Recommendation outranks price.
        assert_eq!(extract_intent("El mejor sitio barato"), Intent::Recommendation);
    }

    #[test]
    fn intent_ignores_case() {
        assert_eq!(extract_intent("HORARIO del bar"), Intent::Hours);
    }

    #[test]
    fn zone_keywords_split_compound_names() {
        let catalog =
            ZoneCatalog::from_entries([("Centro", 37.2571, -6.9406), ("Pescadería, Tres Ventanas", 37.25, -6.95)])
                .unwrap();
        assert_eq!(zone_keywords(&catalog), ["centro", "pescadería", "tres ventanas"]);
    }

    #[test]
    fn mentioned_zone_follows_catalog_order() {
        let keywords = zone_keywords(&ZoneCatalog::from_profile(ZoneProfile::Provincia));
        assert_eq!(
            mentioned_zone("Algo en Punta Umbría o en el Centro", &keywords),
            Some("centro")
        );
        assert_eq!(mentioned_zone("Quiero marisco en ISLA CRISTINA", &keywords), Some("isla cristina"));
        assert_eq!(mentioned_zone("Algo rico", &keywords), None);
    }
}

use guia_store::VenueView;

pub const MAX_CONTEXT_VENUES: usize = 10;

pub const SYSTEM_PROMPT: &str = "Eres un asistente experto en restaurantes y gastronomía de Huelva, España.
Tu objetivo es ayudar a los usuarios a encontrar los mejores locales según sus preferencias.

IMPORTANTE: Solo puedes recomendar locales que existan en la base de datos proporcionada.
NO inventes ni menciones lugares que no estén en la lista.
Si no hay locales relevantes, indícalo claramente.

Cuando recomiendes un lugar, menciona su nombre, zona y puntuación.
Responde de forma amigable, clara y concisa en español.";

const CONTEXT_HEADER: &str = "=== LOCALES DISPONIBLES EN HUELVA ===";
const CONTEXT_FOOTER: &str = "=================================";
const NO_VENUES: &str = "=== NO HAY LOCALES EN LA BASE DE DATOS AÚN ===";

/// Descriptions longer than this are cut to keep prompts small.
const MAX_DESCRIPTION_BYTES: usize = 280;

/// Render venues as the grounding block appended to the system prompt.
pub fn build_context(venues: &[VenueView]) -> String {
    if venues.is_empty() {
        return NO_VENUES.to_string();
    }

    let mut block = String::from(CONTEXT_HEADER);
    block.push('\n');
    for view in venues.iter().take(MAX_CONTEXT_VENUES) {
        let venue = &view.venue;
        block.push_str(&format!(
            "- {} ({}) en {}. Puntuación: {:.1}/10\n",
            venue.name,
            venue.category.as_deref().unwrap_or("Local"),
            venue.zone.as_deref().unwrap_or("zona desconocida"),
            venue.score,
        ));
        if let Some(description) = venue.description.as_deref().filter(|d| !d.trim().is_empty()) {
            block.push_str("  ");
            block.push_str(ai_client::truncate_to_char_boundary(
                description.trim(),
                MAX_DESCRIPTION_BYTES,
            ));
            block.push('\n');
        }
    }
    block.push_str(CONTEXT_FOOTER);
    block
}

/// System prompt followed by the venue block.
pub fn system_message(venues: &[VenueView]) -> String {
    format!("{SYSTEM_PROMPT}\n\n{}", build_context(venues))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::tests::view;

    #[test]
    fn empty_context_says_so() {
        assert_eq!(build_context(&[]), NO_VENUES);
        assert!(system_message(&[]).ends_with(NO_VENUES));
    }

    #[test]
    fn lists_venue_lines_with_descriptions() {
        let venues = vec![
            view("Casa Rufino", Some("Isla Cristina"), 9.1, Some("Pescado fresco")),
            view("Bar Sin Nada", None, 7.0, None),
        ];
        let context = build_context(&venues);
        let lines: Vec<_> = context.lines().collect();
        assert_eq!(lines[0], CONTEXT_HEADER);
        assert_eq!(lines[1], "- Casa Rufino (Restaurante) en Isla Cristina. Puntuación: 9.1/10");
        assert_eq!(lines[2], "  Pescado fresco");
        assert_eq!(lines[3], "- Bar Sin Nada (Restaurante) en zona desconocida. Puntuación: 7.0/10");
        assert_eq!(lines[4], CONTEXT_FOOTER);
    }

    #[test]
    fn caps_entries() {
        let venues: Vec<_> = (0..15)
            .map(|i| view(&format!("Local {i}"), Some("Centro"), 5.0, None))
            .collect();
        let context = build_context(&venues);
        assert_eq!(context.lines().filter(|l| l.starts_with("- ")).count(), MAX_CONTEXT_VENUES);
    }
}

use anyhow::Result;
use guia_common::ReviewInput;
use guia_zones::{ZoneCatalog, ZoneProfile};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use crate::review::Review;
use crate::venue::{NewVenue, Venue};
use crate::zone::ZoneRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub zones: u64,
    pub venues: usize,
    pub reviews: usize,
}

fn demo_venues() -> Vec<NewVenue> {
    vec![
        NewVenue::new("Restaurante Azabache", "Calle Vázquez López, 22, Huelva")
            .zone("Centro")
            .category("Restaurante")
            .description("Cocina mediterránea con productos locales de calidad")
            .score(8.7)
            .at(37.2574, -6.9501),
        NewVenue::new("Bar El Rinconcito", "Plaza de las Monjas, 5, Huelva")
            .zone("Centro")
            .category("Bar")
            .description("Tapas tradicionales y ambiente familiar")
            .score(7.9)
            .at(37.2568, -6.9495),
        NewVenue::new("Mesón Don Jamón", "Calle Rico, 8, Huelva")
            .zone("Centro")
            .category("Mesón")
            .description("Especialidad en jamón ibérico y carnes")
            .score(8.3)
            .at(37.2580, -6.9510),
        NewVenue::new("Restaurante Casa Rufino", "Avenida de la Playa, 15, Isla Cristina")
            .zone("Isla Cristina")
            .category("Restaurante")
            .description("Pescado fresco y mariscos de la zona")
            .score(9.1)
            .at(37.1986, -7.3183),
        NewVenue::new("Bar La Marina", "Puerto Deportivo, s/n, Isla Cristina")
            .zone("Isla Cristina")
            .category("Bar")
            .description("Vistas al puerto, tapas de pescado")
            .score(8.0)
            .at(37.2020, -7.3200),
        NewVenue::new("Chiringuito El Paraíso", "Playa de Punta Umbría, Punta Umbría")
            .zone("Punta Umbría")
            .category("Chiringuito")
            .description("Espetos en la playa, ambiente playero")
            .score(8.5)
            .at(37.1800, -6.9670),
        NewVenue::new("Restaurante Los Marineros", "Avenida del Océano, 32, Punta Umbría")
            .zone("Punta Umbría")
            .category("Restaurante")
            .description("Cocina marinera tradicional")
            .score(8.8)
            .at(37.1820, -6.9680),
        NewVenue::new("Restaurante Jamón y Gambas", "Calle El Rompido, 10, Cartaya")
            .zone("El Rompido")
            .category("Restaurante")
            .description("Fusión de sierra y mar")
            .score(8.6)
            .at(37.2150, -7.1350),
        NewVenue::new("Taberna El Molinero", "Calle San José, 45, Huelva")
            .zone("Molinos")
            .category("Taberna")
            .description("Cocina casera y ambiente acogedor")
            .score(7.8)
            .at(37.2620, -6.9450),
        NewVenue::new("Cervecería La Espiga", "Avenida de Alemania, 20, Huelva")
            .zone("Molinos")
            .category("Cervecería")
            .description("Variedad de cervezas artesanales y tapas")
            .score(8.2)
            .at(37.2630, -6.9460),
    ]
}

/// (venue index in `demo_venues`, rating, content)
const DEMO_REVIEWS: &[(usize, i32, &str)] = &[
    (0, 9, "Excelente comida, el atún rojo espectacular"),
    (0, 8, "Buena relación calidad-precio"),
    (3, 10, "El mejor pescado de Isla Cristina, sin duda"),
    (3, 9, "Langostinos fresquísimos, altamente recomendable"),
    (5, 8, "Perfecto para comer en la playa"),
    (6, 9, "Arroz caldoso buenísimo"),
];

/// Load the demo dataset. Does nothing and returns `None` when any venue
/// already exists.
pub async fn seed_demo(pool: &PgPool) -> Result<Option<SeedSummary>> {
    if Venue::count(pool).await? > 0 {
        info!("Venues already present, skipping demo seed");
        return Ok(None);
    }

    let zones =
        ZoneRecord::create_many(&ZoneCatalog::from_profile(ZoneProfile::Provincia), pool).await?;

    let mut venues = Vec::new();
    for new in demo_venues() {
        venues.push(Venue::create(&new, pool).await?);
    }

    let mut reviews = 0;
    for &(index, rating, content) in DEMO_REVIEWS {
        let input = ReviewInput {
            content: content.to_string(),
            rating,
            venue_id: venues[index].id,
        };
        if Review::create(&input, pool).await?.is_some() {
            reviews += 1;
        }
    }

    let summary = SeedSummary {
        zones,
        venues: venues.len(),
        reviews,
    };
    info!(zones, venues = summary.venues, reviews, "Demo data seeded");
    Ok(Some(summary))
}

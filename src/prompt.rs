//! Prompt assembly: structured chart facts to the narrative briefing
//!
//! Pure string templating. The briefing enumerates a fixed, ordered set of
//! 28 named sections; the titles and their order are part of the contract
//! with the narrative collaborator, so nothing here may be reordered or
//! dropped. Degrees are rounded to two decimals only at this boundary; the
//! chart itself keeps full precision.

use crate::error::ChartError;
use crate::models::birth::{BirthInput, Language};
use crate::models::chart::ChartResult;
use crate::models::location::{GeoCoordinate, TimeZoneInfo};
use crate::Result;

/// Number of named sections in the briefing
pub const SECTION_COUNT: usize = 28;

const SECTION_TITLES_ES: [&str; SECTION_COUNT] = [
    "Identidad esencial (el Sol)",
    "Mundo emocional (la Luna)",
    "Ascendente y presencia exterior",
    "Medio Cielo y vocación",
    "Mente y comunicación (Mercurio)",
    "Afecto y valores (Venus)",
    "Energía y deseo (Marte)",
    "Expansión y fe (Júpiter)",
    "Estructura y límites (Saturno)",
    "Originalidad y ruptura (Urano)",
    "Sensibilidad y trascendencia (Neptuno)",
    "Transformación profunda (Plutón)",
    "Casa 1: la personalidad",
    "Casa 2: recursos propios",
    "Casa 3: entorno cercano",
    "Casa 4: raíces y familia",
    "Casa 5: creatividad y placer",
    "Casa 6: trabajo y salud",
    "Casa 7: vínculos y pareja",
    "Casa 8: crisis y regeneración",
    "Casa 9: horizontes y filosofía",
    "Casa 10: profesión y estatus",
    "Casa 11: amistades y proyectos",
    "Casa 12: mundo interno",
    "Síntesis de fortalezas",
    "Desafíos y sombras",
    "Técnicas prácticas de crecimiento personal",
    "Técnicas prácticas para las relaciones",
];

const SECTION_TITLES_EN: [&str; SECTION_COUNT] = [
    "Core identity (the Sun)",
    "Emotional world (the Moon)",
    "Ascendant and outward presence",
    "Midheaven and vocation",
    "Mind and communication (Mercury)",
    "Affection and values (Venus)",
    "Drive and desire (Mars)",
    "Expansion and belief (Jupiter)",
    "Structure and limits (Saturn)",
    "Originality and disruption (Uranus)",
    "Sensitivity and transcendence (Neptune)",
    "Deep transformation (Pluto)",
    "House 1: the self",
    "House 2: personal resources",
    "House 3: immediate world",
    "House 4: roots and family",
    "House 5: creativity and pleasure",
    "House 6: work and health",
    "House 7: partnership",
    "House 8: crisis and regeneration",
    "House 9: horizons and philosophy",
    "House 10: profession and status",
    "House 11: friendships and projects",
    "House 12: the inner world",
    "Synthesis of strengths",
    "Challenges and shadows",
    "Practical personal-growth techniques",
    "Practical relationship techniques",
];

/// Section titles in contract order for the requested language
#[must_use]
pub fn section_titles(language: Language) -> &'static [&'static str; SECTION_COUNT] {
    match language {
        Language::Es => &SECTION_TITLES_ES,
        Language::En => &SECTION_TITLES_EN,
    }
}

/// Build the narrative briefing from the chart and location facts.
///
/// A chart missing any of its 10 placements or 12 cusps is an internal
/// error here, never a silently shorter prompt.
pub fn assemble_prompt(
    birth: &BirthInput,
    coordinate: &GeoCoordinate,
    zone: &TimeZoneInfo,
    chart: &ChartResult,
) -> Result<String> {
    if chart.placements.len() != 10 {
        return Err(ChartError::MissingChartField {
            field: "placements",
        });
    }
    if chart.cusps.len() != 12 {
        return Err(ChartError::MissingChartField { field: "cusps" });
    }

    let language = birth.language;
    let mut lines: Vec<String> = Vec::new();

    match language {
        Language::Es => {
            lines.push(format!(
                "Eres un astrólogo profesional. Interpreta la carta natal de una persona \
                 de sexo {}, nacida el {} a las {} en {} \
                 (latitud {:.4}, longitud {:.4}, zona horaria {}).",
                birth.sex.label(language),
                birth.date,
                birth.time.format("%H:%M"),
                birth.place,
                coordinate.latitude,
                coordinate.longitude,
                zone.zone_id,
            ));
            lines.push(String::new());
            lines.push("Posiciones planetarias:".to_string());
        }
        Language::En => {
            lines.push(format!(
                "You are a professional astrologer. Interpret the natal chart of a person \
                 of {} sex, born on {} at {} in {} \
                 (latitude {:.4}, longitude {:.4}, time zone {}).",
                birth.sex.label(language),
                birth.date,
                birth.time.format("%H:%M"),
                birth.place,
                coordinate.latitude,
                coordinate.longitude,
                zone.zone_id,
            ));
            lines.push(String::new());
            lines.push("Planetary positions:".to_string());
        }
    }

    let house_word = match language {
        Language::Es => "casa",
        Language::En => "house",
    };

    for placement in &chart.placements {
        lines.push(format!(
            "- {}: {} {:.2}°, {} {}",
            placement.body.name(language),
            placement.sign.name(language),
            placement.degree_in_sign,
            house_word,
            placement.house,
        ));
    }

    match language {
        Language::Es => {
            lines.push(format!("- Ascendente: {}", chart.ascendant_sign.name(language)));
            lines.push(format!("- Medio Cielo: {}", chart.midheaven_sign.name(language)));
            lines.push(String::new());
            lines.push("Cúspides de las casas (sistema Placidus):".to_string());
        }
        Language::En => {
            lines.push(format!("- Ascendant: {}", chart.ascendant_sign.name(language)));
            lines.push(format!("- Midheaven: {}", chart.midheaven_sign.name(language)));
            lines.push(String::new());
            lines.push("House cusps (Placidus system):".to_string());
        }
    }

    for cusp in &chart.cusps {
        lines.push(format!(
            "- {} {}: {} {:.2}°",
            capitalized_house(language),
            cusp.house,
            cusp.sign.name(language),
            cusp.degree_in_sign,
        ));
    }

    lines.push(String::new());
    match language {
        Language::Es => lines.push(
            "Estructura la respuesta exactamente en las siguientes 28 secciones, \
             en este orden y con estos títulos:"
                .to_string(),
        ),
        Language::En => lines.push(
            "Structure the response in exactly the following 28 sections, \
             in this order and with these titles:"
                .to_string(),
        ),
    }

    for (index, title) in section_titles(language).iter().enumerate() {
        lines.push(format!("{}. {}", index + 1, title));
    }

    lines.push(String::new());
    match language {
        Language::Es => {
            lines.push(
                "En las secciones 27 y 28 ofrece técnicas prácticas y concretas, \
                 descritas paso a paso, que la persona pueda aplicar en su vida \
                 diaria a partir de lo que muestra su carta."
                    .to_string(),
            );
            lines.push(
                "No menciones tarot, numerología, runas, sanación con cristales, \
                 quiromancia ni I Ching."
                    .to_string(),
            );
            lines.push(
                "Dirígete a la persona directamente, de tú, con un tono cálido y \
                 psicológicamente envolvente."
                    .to_string(),
            );
            lines.push("Escribe toda la respuesta en español.".to_string());
        }
        Language::En => {
            lines.push(
                "In sections 27 and 28 give concrete, practical techniques, \
                 described step by step, that the person can apply in daily life \
                 based on what the chart shows."
                    .to_string(),
            );
            lines.push(
                "Do not mention tarot, numerology, runes, crystal healing, \
                 palmistry, or the I Ching."
                    .to_string(),
            );
            lines.push(
                "Address the person directly, in a warm, psychologically \
                 engaging tone."
                    .to_string(),
            );
            lines.push("Write the entire response in English.".to_string());
        }
    }

    Ok(lines.join("\n"))
}

fn capitalized_house(language: Language) -> &'static str {
    match language {
        Language::Es => "Casa",
        Language::En => "House",
    }
}

//! Chart result model: bodies, signs, placements, and house cusps

use std::fmt;

use serde::{Deserialize, Serialize};

use super::birth::Language;

/// The ten bodies of a natal chart, in the fixed order the ephemeris
/// reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 10] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
    ];

    /// Localized display name used in the narrative prompt
    #[must_use]
    pub fn name(self, language: Language) -> &'static str {
        match language {
            Language::Es => match self {
                CelestialBody::Sun => "Sol",
                CelestialBody::Moon => "Luna",
                CelestialBody::Mercury => "Mercurio",
                CelestialBody::Venus => "Venus",
                CelestialBody::Mars => "Marte",
                CelestialBody::Jupiter => "Júpiter",
                CelestialBody::Saturn => "Saturno",
                CelestialBody::Uranus => "Urano",
                CelestialBody::Neptune => "Neptuno",
                CelestialBody::Pluto => "Plutón",
            },
            Language::En => match self {
                CelestialBody::Sun => "Sun",
                CelestialBody::Moon => "Moon",
                CelestialBody::Mercury => "Mercury",
                CelestialBody::Venus => "Venus",
                CelestialBody::Mars => "Mars",
                CelestialBody::Jupiter => "Jupiter",
                CelestialBody::Saturn => "Saturn",
                CelestialBody::Uranus => "Uranus",
                CelestialBody::Neptune => "Neptune",
                CelestialBody::Pluto => "Pluto",
            },
        }
    }
}

/// The twelve zodiac signs, ordered from the vernal equinox.
///
/// Each sign spans exactly 30° of ecliptic longitude; index 0 starts at 0°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing the given ecliptic longitude.
    ///
    /// The longitude is normalized to [0, 360) first, so a longitude of
    /// exactly 30.0 falls in Taurus, never Aries: each sign's interval is
    /// closed at its start and open at its end.
    #[must_use]
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let index = (normalized / 30.0).floor() as usize;
        // index 12 is unreachable: rem_euclid(360.0) < 360.0
        Self::ALL[index.min(11)]
    }

    /// Localized display name used in the narrative prompt
    #[must_use]
    pub fn name(self, language: Language) -> &'static str {
        match language {
            Language::Es => match self {
                ZodiacSign::Aries => "Aries",
                ZodiacSign::Taurus => "Tauro",
                ZodiacSign::Gemini => "Géminis",
                ZodiacSign::Cancer => "Cáncer",
                ZodiacSign::Leo => "Leo",
                ZodiacSign::Virgo => "Virgo",
                ZodiacSign::Libra => "Libra",
                ZodiacSign::Scorpio => "Escorpio",
                ZodiacSign::Sagittarius => "Sagitario",
                ZodiacSign::Capricorn => "Capricornio",
                ZodiacSign::Aquarius => "Acuario",
                ZodiacSign::Pisces => "Piscis",
            },
            Language::En => match self {
                ZodiacSign::Aries => "Aries",
                ZodiacSign::Taurus => "Taurus",
                ZodiacSign::Gemini => "Gemini",
                ZodiacSign::Cancer => "Cancer",
                ZodiacSign::Leo => "Leo",
                ZodiacSign::Virgo => "Virgo",
                ZodiacSign::Libra => "Libra",
                ZodiacSign::Scorpio => "Scorpio",
                ZodiacSign::Sagittarius => "Sagittarius",
                ZodiacSign::Capricorn => "Capricorn",
                ZodiacSign::Aquarius => "Aquarius",
                ZodiacSign::Pisces => "Pisces",
            },
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(Language::En))
    }
}

/// One body's position in the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPlacement {
    pub body: CelestialBody,
    /// Ecliptic longitude normalized to [0, 360)
    pub longitude: f64,
    pub sign: ZodiacSign,
    /// Degrees into the sign, [0, 30); full precision, rounded only when
    /// rendered
    pub degree_in_sign: f64,
    /// House index, 1-12
    pub house: u8,
}

/// The start of one house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number, 1-12
    pub house: u8,
    /// Ecliptic longitude normalized to [0, 360)
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
}

/// Complete mapped chart for one request.
///
/// Immutable once built; placements keep the fixed body order and cusps are
/// ordered house 1 through 12.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub placements: Vec<BodyPlacement>,
    pub cusps: Vec<HouseCusp>,
    pub ascendant_sign: ZodiacSign,
    pub midheaven_sign: ZodiacSign,
    pub sun_sign: ZodiacSign,
    pub moon_sign: ZodiacSign,
}

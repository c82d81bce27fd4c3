//! Chart mapping: raw ecliptic longitudes to signs, degrees, and houses
//!
//! Pure functions from the ephemeris oracle's output to a `ChartResult`.
//! All longitudes are normalized to [0, 360) before any derivation, and
//! every sign and house interval is closed at its start and open at its
//! end, so a longitude sitting exactly on a boundary belongs to the segment
//! that starts there.

use crate::error::ChartError;
use crate::models::chart::{BodyPlacement, CelestialBody, ChartResult, HouseCusp, ZodiacSign};

/// Raw longitudes from the ephemeris oracle, before mapping.
///
/// `cusps` follows the ephemeris convention of 13 slots with slot 0 unused;
/// slots 1-12 hold the cusps of houses 1-12.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChart {
    /// One longitude per body, in `CelestialBody::ALL` order
    pub bodies: Vec<f64>,
    pub cusps: Vec<f64>,
    pub ascendant: f64,
    pub midheaven: f64,
}

/// Normalize an ecliptic longitude to [0, 360)
#[must_use]
pub fn normalize_longitude(longitude: f64) -> f64 {
    longitude.rem_euclid(360.0)
}

/// Degrees into the sign, [0, 30)
#[must_use]
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_longitude(longitude).rem_euclid(30.0)
}

/// House containing the given longitude.
///
/// `cusps` holds the 12 house-start longitudes, house 1 first. The search
/// is circular: each house spans from its own cusp up to (but excluding)
/// the next one, and house 12 wraps past 0° back to house 1's cusp.
#[must_use]
pub fn house_of(longitude: f64, cusps: &[f64]) -> Option<u8> {
    if cusps.len() != 12 {
        return None;
    }
    let lon = normalize_longitude(longitude);
    for h in 0..12 {
        let start = normalize_longitude(cusps[h]);
        let end = normalize_longitude(cusps[(h + 1) % 12]);
        let inside = if start <= end {
            lon >= start && lon < end
        } else {
            // interval crosses 0°/360°
            lon >= start || lon < end
        };
        if inside {
            return Some(h as u8 + 1);
        }
    }
    None
}

/// Map the ephemeris oracle's raw longitudes into a complete chart.
///
/// Body house assignment uses the same cusp set reported in the result;
/// there is exactly one house system per chart.
pub fn map_chart(raw: &RawChart) -> Result<ChartResult, ChartError> {
    if raw.cusps.len() < 13 {
        return Err(ChartError::MissingChartField { field: "cusps" });
    }
    // slot 0 is unused by convention
    let cusp_longitudes = &raw.cusps[1..13];

    let mut placements = Vec::with_capacity(CelestialBody::ALL.len());
    for (index, body) in CelestialBody::ALL.iter().enumerate() {
        let raw_longitude = *raw
            .bodies
            .get(index)
            .ok_or(ChartError::MissingChartField { field: "bodies" })?;
        let longitude = normalize_longitude(raw_longitude);
        let house = house_of(longitude, cusp_longitudes).ok_or_else(|| {
            ChartError::house(format!(
                "no house interval contains longitude {longitude:.4}"
            ))
        })?;
        placements.push(BodyPlacement {
            body: *body,
            longitude,
            sign: ZodiacSign::from_longitude(longitude),
            degree_in_sign: degree_in_sign(longitude),
            house,
        });
    }

    let cusps = cusp_longitudes
        .iter()
        .enumerate()
        .map(|(index, &raw_longitude)| {
            let longitude = normalize_longitude(raw_longitude);
            HouseCusp {
                house: index as u8 + 1,
                longitude,
                sign: ZodiacSign::from_longitude(longitude),
                degree_in_sign: degree_in_sign(longitude),
            }
        })
        .collect();

    let sun_sign = placements[0].sign;
    let moon_sign = placements[1].sign;

    Ok(ChartResult {
        placements,
        cusps,
        ascendant_sign: ZodiacSign::from_longitude(raw.ascendant),
        midheaven_sign: ZodiacSign::from_longitude(raw.midheaven),
        sun_sign,
        moon_sign,
    })
}

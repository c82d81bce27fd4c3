//! `AstroAI` - Natal chart computation and narrative interpretation
//!
//! This library resolves a birth place to coordinates and timezone facts,
//! converts the local birth time to an astronomical time scalar, maps the
//! ephemeris collaborator's raw longitudes into zodiac signs and Placidus
//! houses, and assembles the structured prompt that drives the narrative
//! generator.

pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod geo;
pub mod julian;
pub mod models;
pub mod narrative;
pub mod pipeline;
pub mod prompt;
pub mod web;

// Re-export core types for public API
pub use chart::RawChart;
pub use config::AstroAiConfig;
pub use error::ChartError;
pub use models::birth::{BirthInput, Language, Sex};
pub use models::chart::{BodyPlacement, CelestialBody, ChartResult, HouseCusp, ZodiacSign};
pub use models::location::{GeoCoordinate, TimeZoneInfo};
pub use pipeline::{ChartReading, ChartService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

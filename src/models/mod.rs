//! Data models for birth input, geography, and chart results

pub mod birth;
pub mod chart;
pub mod location;

pub use birth::{BirthInput, Language, Sex};
pub use chart::{BodyPlacement, CelestialBody, ChartResult, HouseCusp, ZodiacSign};
pub use location::{GeoCoordinate, TimeZoneInfo};

//! Birth input model parsed from the inbound request
//!
//! A `BirthInput` is created once from the request fields and never mutated.
//! Date and time parsing happens here so that an impossible calendar instant
//! (Feb 30, hour 25) is rejected before any upstream call is made.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Output language for the narrative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
}

impl Language {
    /// Parse the request's language code
    pub fn parse(raw: &str) -> Result<Self, ChartError> {
        match raw.trim().to_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            other => Err(ChartError::validation(format!(
                "language must be \"es\" or \"en\", got \"{other}\""
            ))),
        }
    }
}

/// Sex as stated in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    /// Lenient parse; anything unrecognized maps to `Other`
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "male" | "m" | "masculino" | "hombre" => Sex::Male,
            "female" | "f" | "femenino" | "mujer" => Sex::Female,
            _ => Sex::Other,
        }
    }

    /// Label used in the narrative prompt
    #[must_use]
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Sex::Male, Language::Es) => "masculino",
            (Sex::Female, Language::Es) => "femenino",
            (Sex::Other, Language::Es) => "no especificado",
            (Sex::Male, Language::En) => "male",
            (Sex::Female, Language::En) => "female",
            (Sex::Other, Language::En) => "unspecified",
        }
    }
}

/// Validated birth data for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    /// Local calendar date of birth
    pub date: NaiveDate,
    /// Local clock time of birth
    pub time: NaiveTime,
    /// Free-text birth place, resolved by the geocoder
    pub place: String,
    pub sex: Sex,
    pub language: Language,
}

impl BirthInput {
    /// Build a `BirthInput` from the raw request strings.
    ///
    /// Expects `YYYY-MM-DD` and `HH:MM`; a composed date/time that does not
    /// denote a real calendar instant is an `InvalidDateTime` error.
    pub fn parse(
        date: &str,
        time: &str,
        place: &str,
        sex: &str,
        language: &str,
    ) -> Result<Self, ChartError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            ChartError::invalid_date_time(format!("birthDate \"{date}\" is not a valid date: {e}"))
        })?;
        let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|e| {
            ChartError::invalid_date_time(format!("birthTime \"{time}\" is not a valid time: {e}"))
        })?;
        let place = place.trim();
        if place.is_empty() {
            return Err(ChartError::validation("birthPlace cannot be empty"));
        }

        Ok(Self {
            date,
            time,
            place: place.to_string(),
            sex: Sex::parse(sex),
            language: Language::parse(language)?,
        })
    }
}

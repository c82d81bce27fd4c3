//! Request pipeline: place → timezone → time → ephemeris → chart → narrative
//!
//! One linear chain of awaited collaborator calls per request. Each step
//! depends on the previous one's output, nothing is retried, and a failure
//! anywhere aborts the whole request. Collaborators are injected so tests
//! can substitute deterministic fakes.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::ephemeris::Ephemeris;
use crate::geo::{PlaceResolver, ZoneResolver};
use crate::models::birth::BirthInput;
use crate::models::chart::ChartResult;
use crate::narrative::Narrator;
use crate::{chart, julian, prompt, Result};

/// Finished reading for one request
#[derive(Debug, Clone, Serialize)]
pub struct ChartReading {
    /// The mapped chart the narrative was generated from
    pub chart: ChartResult,
    /// The narrative text returned by the generator
    pub chart_text: String,
}

/// The chart generation pipeline with its injected collaborators
pub struct ChartService {
    places: Arc<dyn PlaceResolver>,
    zones: Arc<dyn ZoneResolver>,
    ephemeris: Arc<dyn Ephemeris>,
    narrator: Arc<dyn Narrator>,
}

impl ChartService {
    pub fn new(
        places: Arc<dyn PlaceResolver>,
        zones: Arc<dyn ZoneResolver>,
        ephemeris: Arc<dyn Ephemeris>,
        narrator: Arc<dyn Narrator>,
    ) -> Self {
        Self {
            places,
            zones,
            ephemeris,
            narrator,
        }
    }

    /// Run the full pipeline for one validated birth input
    #[instrument(skip(self, birth), fields(place = %birth.place))]
    pub async fn generate(&self, birth: &BirthInput) -> Result<ChartReading> {
        let coordinate = self.places.resolve_place(&birth.place).await?;

        let instant = julian::birth_instant_unix(birth.date, birth.time);
        let zone = self.zones.resolve_time_zone(&coordinate, instant).await?;

        let julian_day = julian::to_julian_day(birth.date, birth.time, zone.total_offset_seconds);
        info!(
            "Birth instant resolved: JD {:.6} in zone {}",
            julian_day, zone.zone_id
        );

        let raw = self.ephemeris.compute(julian_day, &coordinate).await?;
        let chart = chart::map_chart(&raw)?;
        info!(
            "Chart mapped: sun {}, moon {}, ascendant {}",
            chart.sun_sign, chart.moon_sign, chart.ascendant_sign
        );

        let briefing = prompt::assemble_prompt(birth, &coordinate, &zone, &chart)?;
        let chart_text = self.narrator.generate(&briefing).await?;

        Ok(ChartReading { chart, chart_text })
    }
}

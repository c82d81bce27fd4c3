use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use astroai::config::AstroAiConfig;
use astroai::ephemeris::EphemerisApiClient;
use astroai::geo::GeoApiClient;
use astroai::narrative::NarrativeApiClient;
use astroai::pipeline::ChartService;
use astroai::web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("astroai=info,tower_http=info")),
        )
        .init();

    // fail fast: missing credentials abort before the server binds
    let config = AstroAiConfig::load()?;

    let geo = Arc::new(GeoApiClient::new(&config.geocoding)?);
    let ephemeris = Arc::new(EphemerisApiClient::new(&config.ephemeris)?);
    let narrator = Arc::new(NarrativeApiClient::new(&config.narrative)?);

    let service = Arc::new(ChartService::new(geo.clone(), geo, ephemeris, narrator));

    web::serve(service, &config.server).await
}

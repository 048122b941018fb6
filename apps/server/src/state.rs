use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use urania::aspects::AspectCalculator;
use urania::bodies::Body;
use urania::chart::ChartSettings;
use urania::ephemeris::{Ephemeris, HouseSystem};
use urania_config::ChartToml;

use crate::geocode::Geocoder;
use crate::zones::TimezoneLookup;

/// Read-only state shared by every request.
pub struct AppState {
    pub ephemeris: Arc<dyn Ephemeris>,
    pub geocoder: Arc<dyn Geocoder>,
    pub zones: Arc<dyn TimezoneLookup>,
    pub chart: ChartSettings,
}

pub type SharedState = Arc<AppState>;

/// Turn the `[chart]` config section into typed chart settings.
pub fn chart_settings(config: &ChartToml) -> anyhow::Result<ChartSettings> {
    let mut seen = HashSet::new();
    let mut bodies = Vec::with_capacity(config.bodies.len());
    for name in &config.bodies {
        let body: Body = name.parse().with_context(|| "invalid chart.bodies entry")?;
        if !seen.insert(body) {
            anyhow::bail!("chart.bodies lists {} twice", body);
        }
        bodies.push(body);
    }

    let house_system: HouseSystem = config
        .house_system
        .parse()
        .with_context(|| "invalid chart.house_system")?;

    Ok(ChartSettings {
        bodies,
        aspects: AspectCalculator::with_orb(config.orb),
        house_system,
    })
}

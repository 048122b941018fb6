use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "URANIA_CONFIG";
const PORT_ENV: &str = "PORT";
const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EphemerisSettings {
    /// "moshier" (built-in) or "swiss" (data files)
    pub mode: String,
    pub path: Option<PathBuf>,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            mode: "moshier".to_string(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartToml {
    pub bodies: Vec<String>,
    pub orb: f64,
    pub house_system: String,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            bodies: [
                "Sun", "Moon", "Mercury", "Venus", "Mars", "Saturn", "Uranus", "Pluto",
                "True Node", "Lilith", "Selena",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            orb: 6.0,
            house_system: "placidus".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: format!("urania/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UraniaSettings {
    pub server: ServerSettings,
    pub ephemeris: EphemerisSettings,
    pub chart: ChartToml,
    pub geocoder: GeocoderSettings,
}

/// Try `URANIA_CONFIG`, then the usual relative locations of `configs/urania.toml`.
///
/// Returns `None` when no file exists; a file that exists but cannot be read
/// is an error.
pub fn read_config_toml_text() -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Ok(explicit) = env::var(CONFIG_ENV) {
        let path = PathBuf::from(explicit);
        let text = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Could not read {} ({CONFIG_ENV}): {e}", path.display()))?;
        return Ok(Some((path, text)));
    }

    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<UraniaSettings> {
    let settings: UraniaSettings =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    validate(&settings)?;
    Ok(settings)
}

pub fn validate(settings: &UraniaSettings) -> anyhow::Result<()> {
    if !settings.chart.orb.is_finite() || settings.chart.orb < 0.0 {
        anyhow::bail!("chart.orb must be a non-negative number, got {}", settings.chart.orb);
    }
    if settings.chart.bodies.is_empty() {
        anyhow::bail!("chart.bodies must list at least one body");
    }
    if settings.geocoder.timeout_secs == 0 {
        anyhow::bail!("geocoder.timeout_secs must be greater than zero");
    }
    Ok(())
}

/// Apply `PORT` and `SWISS_EPHEMERIS_PATH` on top of file settings.
pub fn apply_env_overrides(
    settings: &mut UraniaSettings,
    port: Option<String>,
    ephemeris_path: Option<String>,
) -> anyhow::Result<()> {
    if let Some(port) = port {
        settings.server.port = port
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{PORT_ENV}={port:?} is not a valid port: {e}"))?;
    }
    if settings.ephemeris.path.is_none() {
        settings.ephemeris.path = Some(
            ephemeris_path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EPHEMERIS_PATH)),
        );
    }
    Ok(())
}

/// Load settings from the config file (or defaults) plus environment overrides.
pub fn load_settings() -> anyhow::Result<(UraniaSettings, Option<PathBuf>)> {
    let (mut settings, source) = match read_config_toml_text()? {
        Some((path, text)) => (parse_settings(&text)?, Some(path)),
        None => (UraniaSettings::default(), None),
    };
    apply_env_overrides(
        &mut settings,
        env::var(PORT_ENV).ok(),
        env::var(EPHEMERIS_PATH_ENV).ok(),
    )?;
    Ok((settings, source))
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<UraniaSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_settings(&text)
}

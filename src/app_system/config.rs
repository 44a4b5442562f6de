/// Marketplace configuration.
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HOMEBITE_DEFAULT_RADIUS_KM | 2.0 | Search radius when the caller gives none |
/// | HOMEBITE_MAX_RADIUS_KM | 5.0 | Cap on any requested radius; may lower the 5 km hard cap, never raise it |
/// | HOMEBITE_CHANNEL_BUFFER | 32 | Request buffer per actor |
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub default_radius_km: f64,
    pub max_radius_km: f64,
    pub channel_buffer: usize,
}

const DEFAULT_RADIUS_KM: f64 = 2.0;
/// Hard cap; no configuration can search wider than this.
pub const MAX_RADIUS_KM: f64 = 5.0;
const CHANNEL_BUFFER: usize = 32;

fn positive_km(km: f64) -> Option<f64> {
    (km.is_finite() && km > 0.0).then_some(km)
}

impl MarketConfig {
    /// Loads configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unparsable values fall back to defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
            value.and_then(|v| v.parse().ok()).unwrap_or(default)
        }

        Self {
            default_radius_km: parsed(lookup("HOMEBITE_DEFAULT_RADIUS_KM"), DEFAULT_RADIUS_KM),
            max_radius_km: parsed(lookup("HOMEBITE_MAX_RADIUS_KM"), MAX_RADIUS_KM).min(MAX_RADIUS_KM),
            channel_buffer: parsed(lookup("HOMEBITE_CHANNEL_BUFFER"), CHANNEL_BUFFER),
        }
    }

    /// Configured cap, never above [`MAX_RADIUS_KM`].
    pub fn radius_cap(&self) -> f64 {
        positive_km(self.max_radius_km).map_or(MAX_RADIUS_KM, |km| km.min(MAX_RADIUS_KM))
    }

    /// Radius to search with: the request clamped to the cap, or the default
    /// when absent, non-finite or not positive.
    pub fn effective_radius(&self, requested: Option<f64>) -> f64 {
        let cap = self.radius_cap();
        match requested.and_then(positive_km) {
            Some(km) => km.min(cap),
            None => positive_km(self.default_radius_km).unwrap_or(DEFAULT_RADIUS_KM).min(cap),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            default_radius_km: DEFAULT_RADIUS_KM,
            max_radius_km: MAX_RADIUS_KM,
            channel_buffer: CHANNEL_BUFFER,
        }
    }
}

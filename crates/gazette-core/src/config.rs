//! Configuration for the integration engine.

use serde::{Deserialize, Serialize};

/// Configuration for cross-document entity matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Text similarity threshold for treating two entities as the same
    /// referent (0.0 - 1.0). Higher values require closer matches.
    /// Default: 0.8
    pub similarity_threshold: f64,
    /// Maximum haversine distance in kilometers under which two located
    /// entities are considered the same place. Default: 1.0
    pub location_radius_km: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.8,
            location_radius_km: 1.0,
        }
    }
}

impl IntegratorConfig {
    /// Create a config with a custom text similarity threshold.
    pub fn with_threshold(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold: similarity_threshold.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Set the location matching radius in kilometers.
    pub fn location_radius_km(mut self, radius_km: f64) -> Self {
        self.location_radius_km = radius_km;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IntegratorConfig::default();
        assert_eq!(config.similarity_threshold, 0.8);
        assert_eq!(config.location_radius_km, 1.0);
    }

    #[test]
    fn test_threshold_is_clamped() {
        let config = IntegratorConfig::with_threshold(1.5);
        assert_eq!(config.similarity_threshold, 1.0);
    }
}

//! Shell configuration: environment overrides on top of the built-in
//! upstream endpoints.

use std::env;

use serde::{Deserialize, Serialize};

use layers::{ImageryProvider, TerrainProvider};
use viewer::ViewerConfig;

pub const DEFAULT_CONTAINER_ID: &str = "globe-container";
pub const DEFAULT_IMAGERY_NAME: &str = "Bhuvan WMS";
pub const DEFAULT_IMAGERY_URL: &str = "https://bhuvan-ras1.nrsc.gov.in/tilecache/tilecache.py";
pub const DEFAULT_IMAGERY_LAYER: &str = "bhuvan_img";
pub const DEFAULT_TERRAIN_NAME: &str = "cdem_10m_2016";
pub const DEFAULT_TERRAIN_URL: &str = "https://vedas.sac.gov.in/elevation/cdem_10m_2016/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub container_id: String,
    pub imagery_name: String,
    pub imagery_url: String,
    pub imagery_layer: String,
    pub terrain_name: String,
    pub terrain_url: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            imagery_name: DEFAULT_IMAGERY_NAME.to_string(),
            imagery_url: DEFAULT_IMAGERY_URL.to_string(),
            imagery_layer: DEFAULT_IMAGERY_LAYER.to_string(),
            terrain_name: DEFAULT_TERRAIN_NAME.to_string(),
            terrain_url: DEFAULT_TERRAIN_URL.to_string(),
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            container_id: env::var("GEOSHELL_CONTAINER")
                .unwrap_or(defaults.container_id),
            imagery_name: env::var("GEOSHELL_IMAGERY_NAME").unwrap_or(defaults.imagery_name),
            imagery_url: env::var("GEOSHELL_IMAGERY_URL").unwrap_or(defaults.imagery_url),
            imagery_layer: env::var("GEOSHELL_IMAGERY_LAYER").unwrap_or(defaults.imagery_layer),
            terrain_name: env::var("GEOSHELL_TERRAIN_NAME").unwrap_or(defaults.terrain_name),
            terrain_url: env::var("GEOSHELL_TERRAIN_URL").unwrap_or(defaults.terrain_url),
        }
    }

    /// Accepts a config document handed across the hosting shell's boundary.
    /// Missing fields fall back to the built-in defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig::new(
            &self.container_id,
            ImageryProvider::wms(&self.imagery_name, &self.imagery_url, &self.imagery_layer),
            TerrainProvider::quantized(&self.terrain_name, &self.terrain_url),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ShellConfig;

    #[test]
    fn json_overrides_merge_with_defaults() {
        let config =
            ShellConfig::from_json(r#"{"imagery_layer": "bhuvan_hyd"}"#).unwrap();
        assert_eq!(config.imagery_layer, "bhuvan_hyd");
        assert_eq!(config.terrain_name, "cdem_10m_2016");
    }

    #[test]
    fn defaults_build_a_complete_viewer_config() {
        let config = ShellConfig::default().viewer_config();
        assert_eq!(config.container_id, "globe-container");
        assert_eq!(config.imagery.layers, "bhuvan_img");
        assert_eq!(config.terrain.label(), "cdem_10m_2016");
        assert_eq!(config.home.elevation, 20_000_000.0);
    }
}

use serde::{Deserialize, Serialize};

/// Terrain capability tag, recorded at attach time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Quantized elevation tiles fetched from an elevation-service URL.
    Quantized,
    /// Smooth ellipsoid surface, no elevation data.
    Ellipsoid,
    Custom,
}

/// Descriptor for a source of elevation data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainProvider {
    pub name: String,
    pub kind: TerrainKind,
    pub url: Option<String>,
}

impl TerrainProvider {
    pub fn quantized(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TerrainKind::Quantized,
            url: Some(url.into()),
        }
    }

    pub fn ellipsoid() -> Self {
        Self {
            name: String::new(),
            kind: TerrainKind::Ellipsoid,
            url: None,
        }
    }

    pub fn label(&self) -> &str {
        match self.kind {
            TerrainKind::Ellipsoid => "Ellipsoid (no terrain)",
            _ if self.name.is_empty() => "Custom Terrain",
            _ => &self.name,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Fixed query parameters sent with every WMS GetMap tile request.
///
/// The upstream service additionally requires an HTTP `Referer` header naming
/// the serving organization's domain; the hosting shell injects it on every
/// outbound request, so it is deliberately absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmsParams {
    pub service: String,
    pub version: String,
    pub tiled: bool,
    pub request: String,
    pub format: String,
    pub transparent: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for WmsParams {
    fn default() -> Self {
        Self {
            service: "WMS".to_string(),
            version: "1.1.1".to_string(),
            tiled: true,
            request: "GetMap".to_string(),
            format: "image/jpeg".to_string(),
            transparent: true,
            width: 256,
            height: 256,
        }
    }
}

impl WmsParams {
    /// Flattens the parameters into query pairs in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("service".to_string(), self.service.clone()),
            ("version".to_string(), self.version.clone()),
            ("tiled".to_string(), self.tiled.to_string()),
            ("request".to_string(), self.request.clone()),
            ("format".to_string(), self.format.clone()),
            ("transparent".to_string(), self.transparent.to_string()),
            ("width".to_string(), self.width.to_string()),
            ("height".to_string(), self.height.to_string()),
        ]
    }
}

/// Provider capability tag, recorded when the provider is attached so that
/// labelling is a field read instead of runtime type inspection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageryKind {
    Wms,
    BingMaps,
    Custom,
}

impl ImageryKind {
    pub fn generic_label(self) -> &'static str {
        match self {
            ImageryKind::Wms => "WMS",
            ImageryKind::BingMaps => "Bing Maps",
            ImageryKind::Custom => "Custom Imagery",
        }
    }
}

/// Descriptor for a tiled raster imagery source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageryProvider {
    /// Human-readable label shown in scene information.
    pub name: String,
    pub kind: ImageryKind,
    pub url: String,
    /// WMS layer name requested from the endpoint.
    pub layers: String,
    /// Spatial reference of the tile grid.
    pub srs: String,
    pub params: WmsParams,
}

impl ImageryProvider {
    pub fn wms(name: impl Into<String>, url: impl Into<String>, layers: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ImageryKind::Wms,
            url: url.into(),
            layers: layers.into(),
            srs: "EPSG:4326".to_string(),
            params: WmsParams::default(),
        }
    }

    /// Label used by scene information: the explicit name, or a generic label
    /// for the provider kind when no name was configured.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.kind.generic_label()
        } else {
            &self.name
        }
    }
}

use foundation::math::Coordinates;
use layers::{ImageryProvider, TerrainProvider};

/// Scene projection mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SceneMode {
    Scene2D,
    #[default]
    Scene3D,
    /// 2.5D hybrid view (flat map with perspective camera).
    Columbus,
}

impl SceneMode {
    /// Parses the mode labels accepted from UI layers; `None` for anything
    /// unrecognized.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "2D" => Some(SceneMode::Scene2D),
            "3D" => Some(SceneMode::Scene3D),
            "columbus" => Some(SceneMode::Columbus),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SceneMode::Scene2D => "2D",
            SceneMode::Scene3D => "3D",
            SceneMode::Columbus => "columbus",
        }
    }
}

/// Recognized viewer construction options.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    /// Built-in navigation widgets (home button, geocoder, mode picker...).
    pub navigation_widgets: bool,
    pub scene_mode: SceneMode,
    pub terrain_exaggeration: f64,
    /// Credit/attribution badge.
    pub show_credits: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            navigation_widgets: false,
            scene_mode: SceneMode::Scene3D,
            terrain_exaggeration: 1.0,
            show_credits: false,
        }
    }
}

/// Default overview position: centered over the primary region of interest,
/// high enough to frame the whole subcontinent.
pub const DEFAULT_HOME_VIEW: Coordinates = Coordinates {
    longitude: 78.9629,
    latitude: 20.5937,
    elevation: 20_000_000.0,
};

/// Everything the manager needs to bring up a viewer, injected once at
/// startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Mount-point identifier on the shell surface.
    pub container_id: String,
    pub options: ViewerOptions,
    pub imagery: ImageryProvider,
    pub terrain: TerrainProvider,
    /// Camera destination of the initial zero-duration fly-to.
    pub home: Coordinates,
}

impl ViewerConfig {
    pub fn new(
        container_id: impl Into<String>,
        imagery: ImageryProvider,
        terrain: TerrainProvider,
    ) -> Self {
        Self {
            container_id: container_id.into(),
            options: ViewerOptions::default(),
            imagery,
            terrain,
            home: DEFAULT_HOME_VIEW,
        }
    }
}

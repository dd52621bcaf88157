use serde::{Deserialize, Serialize};

/// Content of the modal layer-info popup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PopupParams {
    pub layer_name: String,
    /// Spatial reference identifier, e.g. `"EPSG:4326"`.
    pub srs: String,
    pub extent: String,
}

/// Visibility and parameters of the single info popup.
///
/// `hide` keeps the last parameters so teardown animation can still read the
/// content of a just-hidden popup. No history beyond one snapshot.
#[derive(Debug, Default)]
pub struct PopupState {
    visible: bool,
    parameters: PopupParams,
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the parameters wholesale and shows the popup.
    pub fn show(&mut self, parameters: PopupParams) {
        self.parameters = parameters;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn params(&self) -> &PopupParams {
        &self.parameters
    }
}

use serde::{Deserialize, Serialize};

/// One entry of the sidebar menu. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub icon: String,
    /// Sub-panel component opened when the item is clicked; items without one
    /// are plain actions.
    #[serde(default)]
    pub component: Option<String>,
    /// Preferred panel width, e.g. `"350px"`.
    #[serde(default)]
    pub width: Option<String>,
}

/// The active menu item list, supplied by an external registry or falling
/// back to the built-in set.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRegistry {
    items: Vec<MenuItem>,
}

impl MenuRegistry {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            items: serde_json::from_str(json)?,
        })
    }

    pub fn builtin() -> Self {
        fn item(id: &str, label: &str, icon: &str, component: &str) -> MenuItem {
            MenuItem {
                id: id.to_string(),
                label: label.to_string(),
                icon: icon.to_string(),
                component: Some(component.to_string()),
                width: Some("350px".to_string()),
            }
        }

        Self {
            items: vec![
                item("addData", "Add Data", "far fa-plus", "AddDataSidebar"),
                item(
                    "layerManager",
                    "Layer Manager",
                    "fas fa-layer-group",
                    "LayerManagerSidebar",
                ),
                item(
                    "visualization",
                    "Visualization",
                    "far fa-eye",
                    "VisualizationSidebar",
                ),
                item("tools", "Tools", "fas fa-tools", "ToolsSidebar"),
                item("plugins", "Plugins", "fas fa-plug", "PluginManagerSidebar"),
            ],
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

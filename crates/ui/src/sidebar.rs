use tracing::debug;

use crate::menu::MenuItem;

/// Width used by the main menu panel and by sub-panels that do not state a
/// preference.
pub const DEFAULT_SIDEBAR_WIDTH: &str = "250px";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarState {
    Closed,
    /// Top-level menu list at the default width.
    OpenMain,
    /// One sub-panel at its preferred width.
    OpenSub { panel: String, width: String },
}

/// Pure state container for the sidebar and its menu.
///
/// Parameterized by the item list and default width; it never talks to the
/// viewer itself. UI layers translate its transitions into bus publications.
#[derive(Debug)]
pub struct MenuSidebar {
    items: Vec<MenuItem>,
    default_width: String,
    state: SidebarState,
}

impl MenuSidebar {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self::with_default_width(items, DEFAULT_SIDEBAR_WIDTH)
    }

    pub fn with_default_width(items: Vec<MenuItem>, default_width: impl Into<String>) -> Self {
        Self {
            items,
            default_width: default_width.into(),
            state: SidebarState::Closed,
        }
    }

    pub fn open_initial_menu(&mut self) {
        self.state = SidebarState::OpenMain;
    }

    /// Opens the item's sub-panel, ensuring the sidebar is open. Items with
    /// no panel component cause no transition.
    pub fn handle_menu_item_click(&mut self, item: &MenuItem) {
        if item.component.is_some() {
            self.state = SidebarState::OpenSub {
                panel: item.id.clone(),
                width: item
                    .width
                    .clone()
                    .unwrap_or_else(|| self.default_width.clone()),
            };
        } else {
            debug!(item = %item.label, "menu item has no sub-panel component");
        }
    }

    /// Returns from a sub-panel to the main menu.
    pub fn handle_close_sub_menu(&mut self) {
        if matches!(self.state, SidebarState::OpenSub { .. }) {
            self.state = SidebarState::OpenMain;
        }
    }

    pub fn close_all(&mut self) {
        self.state = SidebarState::Closed;
    }

    pub fn state(&self) -> &SidebarState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != SidebarState::Closed
    }

    pub fn current_width(&self) -> &str {
        match &self.state {
            SidebarState::OpenSub { width, .. } => width,
            _ => &self.default_width,
        }
    }

    /// Component of the active sub-panel, looked up from the item list.
    pub fn active_panel_component(&self) -> Option<&str> {
        let SidebarState::OpenSub { panel, .. } = &self.state else {
            return None;
        };
        self.items
            .iter()
            .find(|item| &item.id == panel)
            .and_then(|item| item.component.as_deref())
    }
}

//! Service channel bundles.
//!
//! The closed set of bus channels, grouped the way the surrounding UI uses
//! them. Producers publish on the channel fields directly; composite
//! operations (those touching more than one channel) and the boot-status
//! notifications are methods.
//!
//! Map channels: update-view, globe-redirect, orient-to-north,
//! render-graphic, remove-graphic, zoom-to-coordinates,
//! display-location-marker, trigger-globe-init, globe-init-status (latched),
//! globe-viewer-available.
//!
//! UI channels: open-initial-menu, close-all, activate-feature,
//! close-submenu, sidebar-open-state (latched), splash-ready (latched).

use tracing::info;

use foundation::math::Coordinates;
use runtime::{Channel, Latched};
use ui::MenuItem;
use viewer::{GraphicEntity, NamedLocation, ViewerId};

/// Default camera height for globe redirects that do not state one.
const REDIRECT_HEIGHT_M: f64 = 500_000.0;

/// View synchronization data for 2D map surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    pub coordinates: Coordinates,
    pub zoom_level: Option<f64>,
}

/// A request to recenter the globe camera.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeRedirect {
    pub coordinates: Coordinates,
}

impl GlobeRedirect {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            coordinates: Coordinates::with_elevation(longitude, latitude, REDIRECT_HEIGHT_M),
        }
    }
}

/// Map view updates, graphic rendering and globe redirection.
pub struct MapService {
    pub update_view: Channel<ViewUpdate>,
    pub redirect_globe: Channel<GlobeRedirect>,
    pub orient_to_north: Channel<()>,
    pub render_graphic: Channel<GraphicEntity>,
    pub remove_graphic: Channel<String>,
    pub zoom_to_coordinates: Channel<Coordinates>,
    pub display_location_marker: Channel<NamedLocation>,
    /// Tells the globe layer to initialize the viewer.
    pub trigger_globe_init: Channel<()>,
    /// Latched init outcome; the orchestrator and late consumers read
    /// `current()` as application truth.
    pub globe_init_status: Latched<bool>,
    /// Viewer instance presence, or `None` after a failed init or destroy.
    pub globe_viewer: Channel<Option<ViewerId>>,
}

impl Default for MapService {
    fn default() -> Self {
        Self::new()
    }
}

impl MapService {
    pub fn new() -> Self {
        Self {
            update_view: Channel::new(),
            redirect_globe: Channel::new(),
            orient_to_north: Channel::new(),
            render_graphic: Channel::new(),
            remove_graphic: Channel::new(),
            zoom_to_coordinates: Channel::new(),
            display_location_marker: Channel::new(),
            trigger_globe_init: Channel::new(),
            globe_init_status: Latched::new(),
            globe_viewer: Channel::new(),
        }
    }

    pub fn trigger_globe_initialization(&self) {
        info!("triggering globe initialization");
        self.trigger_globe_init.publish(());
    }

    pub fn notify_globe_initialized(&self, is_ready: bool) {
        info!(is_ready, "globe initialization status");
        self.globe_init_status.publish(is_ready);
    }

    pub fn set_globe_viewer(&self, viewer: Option<ViewerId>) {
        info!(present = viewer.is_some(), "viewer instance set");
        self.globe_viewer.publish(viewer);
    }
}

/// Global UI state: sidebar visibility and active features.
pub struct UserInterfaceService {
    pub open_sidebar_panel: Channel<()>,
    pub close_sidebar: Channel<()>,
    pub activate_feature: Channel<MenuItem>,
    pub close_submenu: Channel<()>,
    /// Latched so late subscribers can read the current open state.
    pub is_sidebar_open: Latched<bool>,
    /// Latched once the splash animation finishes.
    pub splash_ready: Latched<()>,
}

impl Default for UserInterfaceService {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterfaceService {
    pub fn new() -> Self {
        Self {
            open_sidebar_panel: Channel::new(),
            close_sidebar: Channel::new(),
            activate_feature: Channel::new(),
            close_submenu: Channel::new(),
            is_sidebar_open: Latched::new(),
            splash_ready: Latched::new(),
        }
    }

    pub fn open_initial_menu(&self) {
        info!("opening initial menu");
        self.open_sidebar_panel.publish(());
        self.is_sidebar_open.publish(true);
    }

    pub fn close_all(&self) {
        info!("closing all panels, returning to globe");
        self.close_sidebar.publish(());
        self.is_sidebar_open.publish(false);
    }

    pub fn handle_menu_item_click(&self, item: MenuItem) {
        info!(item = %item.label, "menu item clicked");
        self.activate_feature.publish(item);
    }

    /// A sub-menu closed; return to the main menu with the sidebar open.
    pub fn handle_close_sub_menu(&self) {
        self.close_submenu.publish(());
        self.open_initial_menu();
    }

    pub fn notify_splash_ready(&self) {
        info!("splash ready signal emitted");
        self.splash_ready.publish(());
    }

    pub fn toggle_sidebar(&self, is_open: bool) {
        info!(is_open, "sidebar toggled");
        self.is_sidebar_open.publish(is_open);
    }
}

/// Retrieval and distribution of menu items.
pub struct MenuItemService {
    pub menu_items_loaded: Channel<Vec<MenuItem>>,
    registry: ui::MenuRegistry,
}

impl MenuItemService {
    pub fn new(registry: ui::MenuRegistry) -> Self {
        Self {
            menu_items_loaded: Channel::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &ui::MenuRegistry {
        &self.registry
    }

    pub fn retrieve_all(&self) {
        self.menu_items_loaded.publish(self.registry.items().to_vec());
        info!(count = self.registry.items().len(), "menu items loaded");
    }
}

#[cfg(test)]
mod tests {
    use super::{MapService, UserInterfaceService};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn open_initial_menu_latches_the_open_state() {
        let ui = UserInterfaceService::new();
        assert_eq!(ui.is_sidebar_open.current(), None);

        let opened = Rc::new(RefCell::new(0u32));
        let opened_l = Rc::clone(&opened);
        let _sub = ui.open_sidebar_panel.subscribe(move |_| *opened_l.borrow_mut() += 1);

        ui.open_initial_menu();
        assert_eq!(*opened.borrow(), 1);
        assert_eq!(ui.is_sidebar_open.current(), Some(true));

        ui.close_all();
        assert_eq!(ui.is_sidebar_open.current(), Some(false));
    }

    #[test]
    fn close_sub_menu_returns_to_the_main_menu() {
        let ui = UserInterfaceService::new();
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let log_c = Rc::clone(&log);
        let _s1 = ui.close_submenu.subscribe(move |_| log_c.borrow_mut().push("close-submenu"));
        let log_c = Rc::clone(&log);
        let _s2 = ui
            .open_sidebar_panel
            .subscribe(move |_| log_c.borrow_mut().push("open-main"));

        ui.handle_close_sub_menu();
        assert_eq!(*log.borrow(), vec!["close-submenu", "open-main"]);
        assert_eq!(ui.is_sidebar_open.current(), Some(true));
    }

    #[test]
    fn init_status_is_readable_after_the_fact() {
        let map = MapService::new();
        assert_eq!(map.globe_init_status.current(), None);
        map.notify_globe_initialized(true);
        assert_eq!(map.globe_init_status.current(), Some(true));
    }

    #[test]
    fn splash_ready_is_latched() {
        let ui = UserInterfaceService::new();
        assert!(ui.splash_ready.current().is_none());
        ui.notify_splash_ready();
        assert!(ui.splash_ready.current().is_some());
    }
}

//! Subscribes the viewer manager and the sidebar machine to their bus
//! channels.
//!
//! Nothing else holds a reference to either: producers publish, the bridges
//! translate. Each bridge owns its subscriptions and releases them on
//! `destroy` (or drop).

use std::cell::RefCell;
use std::rc::Rc;

use tracing::error;

use runtime::Subscription;
use ui::MenuSidebar;
use viewer::{CameraListener, ViewerManager};

use crate::services::{MapService, UserInterfaceService, ViewUpdate};

/// Drives the viewer manager from the map channels and reports init status
/// back.
///
/// After a successful init it also registers a camera listener that mirrors
/// every camera move onto the view-update channel for 2D map surfaces; the
/// registration is a manual resource released again on `destroy`.
pub struct GlobeBridge {
    manager: Rc<RefCell<ViewerManager>>,
    subscriptions: Vec<Subscription>,
    camera_listener: Rc<RefCell<Option<CameraListener>>>,
}

impl GlobeBridge {
    pub fn connect(map: &Rc<MapService>, manager: Rc<RefCell<ViewerManager>>) -> Self {
        let mut subscriptions = Vec::new();
        let camera_listener: Rc<RefCell<Option<CameraListener>>> = Rc::new(RefCell::new(None));

        let mgr = Rc::clone(&manager);
        let map_back = Rc::clone(map);
        let listener_slot = Rc::clone(&camera_listener);
        subscriptions.push(map.trigger_globe_init.subscribe(move |_| {
            let result = mgr.borrow_mut().init();
            match result {
                Ok(id) => {
                    let map_view = Rc::clone(&map_back);
                    let listener: CameraListener = Rc::new(move |pose| {
                        map_view.update_view.publish(ViewUpdate {
                            coordinates: pose.coordinates(),
                            zoom_level: None,
                        });
                    });
                    mgr.borrow_mut().add_camera_change_listener(&listener);
                    *listener_slot.borrow_mut() = Some(listener);

                    map_back.notify_globe_initialized(true);
                    map_back.set_globe_viewer(Some(id));
                }
                Err(err) => {
                    error!(%err, "globe initialization failed");
                    map_back.notify_globe_initialized(false);
                    map_back.set_globe_viewer(None);
                }
            }
        }));

        let mgr = Rc::clone(&manager);
        subscriptions.push(
            map.render_graphic
                .subscribe(move |graphic| mgr.borrow_mut().render_graphic(graphic)),
        );

        let mgr = Rc::clone(&manager);
        subscriptions.push(
            map.remove_graphic
                .subscribe(move |identifier| mgr.borrow_mut().remove_graphic(identifier)),
        );

        let mgr = Rc::clone(&manager);
        subscriptions.push(
            map.zoom_to_coordinates
                .subscribe(move |coordinates| mgr.borrow_mut().zoom_to_coordinates(coordinates)),
        );

        let mgr = Rc::clone(&manager);
        subscriptions.push(
            map.display_location_marker
                .subscribe(move |location| mgr.borrow_mut().display_location_marker(location)),
        );

        let mgr = Rc::clone(&manager);
        subscriptions.push(
            map.orient_to_north
                .subscribe(move |_| mgr.borrow_mut().orient_to_north()),
        );

        let mgr = Rc::clone(&manager);
        subscriptions.push(map.redirect_globe.subscribe(move |redirect| {
            mgr.borrow_mut().zoom_to_coordinates(&redirect.coordinates)
        }));

        Self {
            manager,
            subscriptions,
            camera_listener,
        }
    }

    pub fn manager(&self) -> &Rc<RefCell<ViewerManager>> {
        &self.manager
    }

    /// Releases the camera listener and every subscription. Safe to call
    /// repeatedly.
    pub fn destroy(&mut self) {
        if let Some(listener) = self.camera_listener.borrow_mut().take() {
            self.manager
                .borrow_mut()
                .remove_camera_change_listener(&listener);
        }
        self.subscriptions.clear();
    }
}

/// Drives the sidebar state machine from the UI channels.
pub struct SidebarBridge {
    sidebar: Rc<RefCell<MenuSidebar>>,
    subscriptions: Vec<Subscription>,
}

impl SidebarBridge {
    pub fn connect(ui: &UserInterfaceService, sidebar: Rc<RefCell<MenuSidebar>>) -> Self {
        let mut subscriptions = Vec::new();

        let bar = Rc::clone(&sidebar);
        subscriptions.push(
            ui.open_sidebar_panel
                .subscribe(move |_| bar.borrow_mut().open_initial_menu()),
        );

        let bar = Rc::clone(&sidebar);
        subscriptions.push(
            ui.close_sidebar
                .subscribe(move |_| bar.borrow_mut().close_all()),
        );

        let bar = Rc::clone(&sidebar);
        subscriptions.push(
            ui.activate_feature
                .subscribe(move |item| bar.borrow_mut().handle_menu_item_click(item)),
        );

        let bar = Rc::clone(&sidebar);
        subscriptions.push(
            ui.close_submenu
                .subscribe(move |_| bar.borrow_mut().handle_close_sub_menu()),
        );

        Self {
            sidebar,
            subscriptions,
        }
    }

    pub fn sidebar(&self) -> &Rc<RefCell<MenuSidebar>> {
        &self.sidebar
    }

    /// Drops every subscription. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.subscriptions.clear();
    }
}

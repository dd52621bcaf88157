//! Desktop shell demo: boots the globe viewer over the bus and drives a short
//! scripted session against the software globe.

mod boot;
mod bridge;
mod config;
mod services;
mod surface;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use foundation::math::Coordinates;
use globe::SoftwareGlobeFactory;
use ui::{MenuRegistry, MenuSidebar, PopupParams, PopupState};
use viewer::{GraphicEntity, NORTH_ARROW_ELEMENT, NamedLocation, RotatableElement, ViewerManager};

use boot::AppInitializer;
use bridge::{GlobeBridge, SidebarBridge};
use config::ShellConfig;
use services::{GlobeRedirect, MapService, MenuItemService, UserInterfaceService};
use surface::{NorthArrow, StaticSurface};

const FRAME_DT_S: f64 = 1.0 / 60.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ShellConfig::from_env();

    let mut surface = StaticSurface::new();
    surface.add_mount_point(&config.container_id);
    let north_arrow = NorthArrow::new();
    surface.add_rotatable_element(
        NORTH_ARROW_ELEMENT,
        Rc::clone(&north_arrow) as Rc<dyn RotatableElement>,
    );

    let map = Rc::new(MapService::new());
    let ui_service = Rc::new(UserInterfaceService::new());
    let menu_service = MenuItemService::new(MenuRegistry::builtin());

    let manager = Rc::new(RefCell::new(ViewerManager::new(
        config.viewer_config(),
        Box::new(SoftwareGlobeFactory),
        Rc::new(surface),
    )));
    let sidebar = Rc::new(RefCell::new(MenuSidebar::new(
        menu_service.registry().items().to_vec(),
    )));

    // The orchestrator subscribes first so it observes the latched boot
    // channels from the start.
    let mut initializer = AppInitializer::new();
    initializer.initialize(&ui_service, &map);

    let mut globe_bridge = GlobeBridge::connect(&map, Rc::clone(&manager));
    let mut sidebar_bridge = SidebarBridge::connect(&ui_service, Rc::clone(&sidebar));

    menu_service.retrieve_all();

    // A 2D map surface would subscribe here; the demo just logs the sync.
    let _view_sub = map.update_view.subscribe(|update| {
        info!(
            lon = update.coordinates.longitude,
            lat = update.coordinates.latitude,
            zoom = ?update.zoom_level,
            "view update"
        );
    });

    // Splash animation finished: the boot flow takes over.
    ui_service.notify_splash_ready();
    info!(phase = ?initializer.phase(), "boot complete");

    // Fly to Bengaluru; the ground-level elevation is replaced with the
    // default camera height.
    map.zoom_to_coordinates
        .publish(Coordinates::with_elevation(77.5946, 12.9716, 500.0));
    for _ in 0..180 {
        globe_bridge.manager().borrow_mut().tick(FRAME_DT_S);
    }
    let scene = globe_bridge.manager().borrow().get_scene_information();
    info!(
        lon = scene.coordinates.longitude,
        lat = scene.coordinates.latitude,
        height_m = scene.coordinates.elevation,
        terrain = %scene.terrain_type,
        imagery = %scene.imagery_type,
        heading_deg = scene.heading_deg,
        "scene after flight"
    );

    map.render_graphic.publish(GraphicEntity::new(
        "campus",
        vec![
            Coordinates::new(77.56, 12.95),
            Coordinates::new(77.62, 12.95),
            Coordinates::new(77.62, 13.00),
            Coordinates::new(77.56, 13.00),
        ],
    ));
    map.display_location_marker.publish(NamedLocation::new(
        "blr",
        "Bengaluru",
        Some(Coordinates::new(77.5946, 12.9716)),
    ));
    map.orient_to_north.publish(());
    for _ in 0..120 {
        manager.borrow_mut().tick(FRAME_DT_S);
    }
    info!(rotation_deg = north_arrow.rotation_deg(), "north arrow");

    // Recenter over Mumbai through the redirect channel.
    map.redirect_globe.publish(GlobeRedirect::new(72.8777, 19.076));
    for _ in 0..180 {
        manager.borrow_mut().tick(FRAME_DT_S);
    }

    ui_service.open_initial_menu();
    if let Some(tools) = menu_service.registry().find("tools") {
        ui_service.handle_menu_item_click(tools.clone());
    }
    {
        let sidebar = sidebar_bridge.sidebar().borrow();
        info!(
            panel = ?sidebar.active_panel_component(),
            width = %sidebar.current_width(),
            "sidebar state"
        );
    }
    ui_service.handle_close_sub_menu();
    ui_service.close_all();
    // The hosting shell resyncs the latched state after manual window changes.
    ui_service.toggle_sidebar(sidebar.borrow().is_visible());

    // Layer info popup, as the layer manager panel would raise it.
    let mut popup = PopupState::new();
    popup.show(PopupParams {
        layer_name: config.imagery_layer.clone(),
        srs: "EPSG:4326".to_string(),
        extent: "68.0,6.0,98.0,38.0".to_string(),
    });
    info!(
        visible = popup.is_visible(),
        layer = %popup.params().layer_name,
        "layer info popup"
    );
    popup.hide();

    // Teardown releases every subscription before the viewer goes away.
    sidebar_bridge.destroy();
    globe_bridge.destroy();
    initializer.destroy();
    manager.borrow_mut().destroy();
}

//! Sole owner of the 3D viewer instance.
//!
//! Every camera, layer and entity mutation passes through the manager. It is
//! UI-adjacent: an operation invoked before `init` (or after `destroy`) is a
//! caller bug surfaced in the logs, never a propagated error, because
//! crashing the interaction loop is worse than a skipped action.

use std::rc::Rc;

use tracing::{info, warn};

use foundation::math::Coordinates;
use layers::{ImageryProvider, TerrainProvider};

use crate::config::{SceneMode, ViewerConfig};
use crate::engine::{
    CameraListener, CameraOrientation, EngineFactory, EntityHandle, FlyTo, GlobeEngine,
    NORTH_ARROW_ELEMENT, ShellSurface, ViewerId,
};
use crate::entities::{EntitySpec, GraphicEntity, NamedLocation};
use crate::error::ViewerError;

/// Animated flight time for `zoom_to_coordinates`.
const COORDINATE_FLIGHT_DURATION_S: f64 = 2.0;
/// Animated flight time for `orient_to_north`.
const NORTH_FLIGHT_DURATION_S: f64 = 1.5;
/// Camera height substituted when a caller passes a ground-level elevation.
const DEFAULT_TARGET_HEIGHT_M: f64 = 25_000.0;
/// Elevations above this are taken as intended camera heights.
const ELEVATION_PASSTHROUGH_THRESHOLD_M: f64 = 1_000.0;

/// Snapshot of the current camera and layer state.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneInformation {
    pub coordinates: Coordinates,
    pub terrain_type: String,
    pub imagery_type: String,
    pub heading_deg: f64,
}

impl SceneInformation {
    /// Well-defined stand-in for a viewer whose camera has not resolved yet.
    fn placeholder() -> Self {
        Self {
            coordinates: Coordinates::default(),
            terrain_type: "N/A".to_string(),
            imagery_type: "N/A".to_string(),
            heading_deg: 0.0,
        }
    }
}

pub struct ViewerManager {
    config: ViewerConfig,
    factory: Box<dyn EngineFactory>,
    surface: Rc<dyn ShellSurface>,
    engine: Option<Box<dyn GlobeEngine>>,
    viewer_id: Option<ViewerId>,
    instance_seq: u64,
    attached_imagery: Option<ImageryProvider>,
    attached_terrain: Option<TerrainProvider>,
    location_marker: Option<EntityHandle>,
    north_listener: Option<CameraListener>,
}

impl ViewerManager {
    pub fn new(
        config: ViewerConfig,
        factory: Box<dyn EngineFactory>,
        surface: Rc<dyn ShellSurface>,
    ) -> Self {
        Self {
            config,
            factory,
            surface,
            engine: None,
            viewer_id: None,
            instance_seq: 0,
            attached_imagery: None,
            attached_terrain: None,
            location_marker: None,
            north_listener: None,
        }
    }

    /// Creates the viewer bound to the configured mount point.
    ///
    /// The engine is constructed without a base imagery provider so the
    /// configured WMS layer becomes the base layer; terrain is attached from
    /// the configured elevation service, depth testing against terrain is
    /// disabled so annotations stay visible, and the camera jumps to the home
    /// overview looking straight down.
    ///
    /// Calling `init` on an already-initialized manager is a no-op that
    /// returns the existing instance.
    pub fn init(&mut self) -> Result<ViewerId, ViewerError> {
        if let Some(id) = self.viewer_id {
            warn!("viewer already initialized; returning existing instance");
            return Ok(id);
        }

        let mut engine =
            self.factory
                .create(self.surface.as_ref(), &self.config.container_id, &self.config.options)?;

        engine.attach_imagery(self.config.imagery.clone());
        self.attached_imagery = Some(self.config.imagery.clone());

        engine.attach_terrain(self.config.terrain.clone());
        self.attached_terrain = Some(self.config.terrain.clone());

        engine.set_depth_test_against_terrain(false);

        // Registered before the home flight so the arrow is synchronized from
        // the first camera move.
        match self.surface.rotatable_element(NORTH_ARROW_ELEMENT) {
            Some(element) => {
                let listener: CameraListener =
                    Rc::new(move |pose| element.set_rotation_deg(pose.heading_rad.to_degrees()));
                engine.add_camera_listener(Rc::clone(&listener));
                self.north_listener = Some(listener);
            }
            None => {
                warn!(
                    element = NORTH_ARROW_ELEMENT,
                    "north indicator element not found; rotation disabled"
                );
            }
        }

        engine.fly_to(FlyTo::with_orientation(
            self.config.home,
            CameraOrientation::default(),
            0.0,
        ));

        self.instance_seq += 1;
        let id = ViewerId(self.instance_seq);
        self.engine = Some(engine);
        self.viewer_id = Some(id);
        info!(container = %self.config.container_id, "viewer created");
        Ok(id)
    }

    /// Releases the viewer and all owned entities. Safe to call when already
    /// destroyed.
    pub fn destroy(&mut self) {
        let Some(mut engine) = self.engine.take() else {
            return;
        };
        if let Some(listener) = self.north_listener.take() {
            engine.remove_camera_listener(&listener);
        }
        drop(engine);
        self.viewer_id = None;
        self.attached_imagery = None;
        self.attached_terrain = None;
        self.location_marker = None;
        info!("viewer destroyed");
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    pub fn viewer_id(&self) -> Option<ViewerId> {
        self.viewer_id
    }

    pub fn engine(&self) -> Option<&dyn GlobeEngine> {
        self.engine.as_deref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut (dyn GlobeEngine + 'static)> {
        self.engine.as_deref_mut()
    }

    /// Renders a point (single-coordinate geometry) or closed polygon
    /// (multi-coordinate geometry) tagged with the caller's identifier.
    ///
    /// Identifiers are caller-managed: a second call with the same identifier
    /// creates a duplicate entity. Callers wanting replacement must
    /// `remove_graphic` first.
    pub fn render_graphic(&mut self, graphic: &GraphicEntity) {
        let Some(engine) = self.engine.as_deref_mut() else {
            warn!("render_graphic called before init; ignoring");
            return;
        };
        if graphic.geometry.is_empty() {
            warn!(identifier = %graphic.identifier, "graphic has empty geometry; ignoring");
            return;
        }

        let spec = if graphic.geometry.len() == 1 {
            EntitySpec::point(graphic.identifier.clone(), graphic.geometry[0])
        } else {
            EntitySpec::polygon(graphic.identifier.clone(), graphic.geometry.clone())
        };
        engine.add_entity(spec);
    }

    /// Removes the first entity tagged with `identifier`; absent identifiers
    /// are a no-op, not an error.
    pub fn remove_graphic(&mut self, identifier: &str) {
        let Some(engine) = self.engine.as_deref_mut() else {
            warn!("remove_graphic called before init; ignoring");
            return;
        };
        if let Some(handle) = engine.entity_by_identifier(identifier) {
            engine.remove_entity(handle);
        }
    }

    /// Flies the camera to `coordinates` over two seconds.
    ///
    /// Elevations at or below 1000 m are treated as placement elevations, not
    /// camera heights, and replaced with a 25 km default so the target is not
    /// occluded by terrain.
    pub fn zoom_to_coordinates(&mut self, coordinates: &Coordinates) {
        let Some(engine) = self.engine.as_deref_mut() else {
            warn!("zoom_to_coordinates called before init; ignoring");
            return;
        };

        let height = if coordinates.elevation > ELEVATION_PASSTHROUGH_THRESHOLD_M {
            coordinates.elevation
        } else {
            DEFAULT_TARGET_HEIGHT_M
        };
        let destination =
            Coordinates::with_elevation(coordinates.longitude, coordinates.latitude, height);
        engine.fly_to(FlyTo::new(destination, COORDINATE_FLIGHT_DURATION_S));
    }

    /// Places a labelled marker at `location`, removing the previous marker
    /// first so at most one exists at any time.
    ///
    /// The previous marker is tracked through the manager's own back-reference
    /// rather than by scanning entities, and is removed even when the new
    /// location has no resolvable coordinates.
    pub fn display_location_marker(&mut self, location: &NamedLocation) {
        let Some(engine) = self.engine.as_deref_mut() else {
            warn!("display_location_marker called before init; ignoring");
            return;
        };

        if let Some(previous) = self.location_marker.take() {
            engine.remove_entity(previous);
        }

        let Some(coordinates) = location.coordinates() else {
            return;
        };
        let spec = EntitySpec::label(
            format!("location-label-{}", location.identifier),
            coordinates,
            location.name.clone(),
        );
        self.location_marker = Some(engine.add_entity(spec));
    }

    /// Re-flies to the current position with heading reset to true north,
    /// preserving pitch and roll.
    pub fn orient_to_north(&mut self) {
        let Some(engine) = self.engine.as_deref_mut() else {
            warn!("orient_to_north called before init; ignoring");
            return;
        };
        let Some(pose) = engine.camera() else {
            warn!("camera position not yet resolved; orient_to_north ignored");
            return;
        };

        engine.fly_to(FlyTo::with_orientation(
            pose.coordinates(),
            CameraOrientation {
                heading_rad: 0.0,
                pitch_rad: pose.pitch_rad,
                roll_rad: pose.roll_rad,
            },
            NORTH_FLIGHT_DURATION_S,
        ));
    }

    /// Moves the camera toward the surface by half the current height.
    pub fn zoom_in(&mut self) {
        let Some(engine) = self.engine.as_deref_mut() else {
            warn!("zoom_in called before init; ignoring");
            return;
        };
        let Some(pose) = engine.camera() else {
            return;
        };
        engine.zoom_in(pose.height_m * 0.5);
    }

    /// Moves the camera away from the surface by the current height.
    pub fn zoom_out(&mut self) {
        let Some(engine) = self.engine.as_deref_mut() else {
            warn!("zoom_out called before init; ignoring");
            return;
        };
        let Some(pose) = engine.camera() else {
            return;
        };
        engine.zoom_out(pose.height_m);
    }

    /// Current camera coordinates, provider labels and heading.
    ///
    /// Returns a zeroed placeholder until the camera position resolves.
    /// Provider labels are field reads off the descriptors recorded at attach
    /// time.
    pub fn get_scene_information(&self) -> SceneInformation {
        let Some(engine) = self.engine.as_deref() else {
            warn!("get_scene_information called before init");
            return SceneInformation::placeholder();
        };
        let Some(pose) = engine.camera() else {
            warn!("camera position not yet resolved");
            return SceneInformation::placeholder();
        };

        SceneInformation {
            coordinates: pose.coordinates(),
            terrain_type: self
                .attached_terrain
                .as_ref()
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            imagery_type: self
                .attached_imagery
                .as_ref()
                .map(|i| i.label().to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            heading_deg: pose.heading_rad.to_degrees(),
        }
    }

    /// Switches the scene projection; unrecognized labels are rejected with a
    /// logged warning and no state change.
    pub fn set_scene_mode(&mut self, label: &str) {
        let Some(engine) = self.engine.as_deref_mut() else {
            warn!("set_scene_mode called before init; ignoring");
            return;
        };
        match SceneMode::from_label(label) {
            Some(mode) => engine.set_scene_mode(mode),
            None => warn!(mode = %label, "unsupported scene mode"),
        }
    }

    /// Registers `listener` to run whenever the camera moves. Keep the `Rc`:
    /// removal is by the same callback reference.
    pub fn add_camera_change_listener(&mut self, listener: &CameraListener) {
        let Some(engine) = self.engine.as_deref_mut() else {
            warn!("add_camera_change_listener called before init; ignoring");
            return;
        };
        engine.add_camera_listener(Rc::clone(listener));
    }

    pub fn remove_camera_change_listener(&mut self, listener: &CameraListener) {
        let Some(engine) = self.engine.as_deref_mut() else {
            return;
        };
        engine.remove_camera_listener(listener);
    }

    /// Forwards the render-loop tick so in-flight camera transitions
    /// progress. No-op before `init`.
    pub fn tick(&mut self, dt_s: f64) {
        if let Some(engine) = self.engine.as_deref_mut() {
            engine.update(dt_s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CameraPose, RotatableElement};
    use crate::entities::{Graphic, GraphicKind};
    use std::cell::Cell;

    struct FakeEngine {
        imagery: Vec<ImageryProvider>,
        terrain: Option<TerrainProvider>,
        depth_test: bool,
        scene_mode: SceneMode,
        pose: Option<CameraPose>,
        entities: Vec<(EntityHandle, EntitySpec)>,
        next_handle: u64,
        listeners: Vec<CameraListener>,
    }

    impl FakeEngine {
        fn new(scene_mode: SceneMode) -> Self {
            Self {
                imagery: Vec::new(),
                terrain: None,
                depth_test: true,
                scene_mode,
                pose: None,
                entities: Vec::new(),
                next_handle: 0,
                listeners: Vec::new(),
            }
        }

        fn notify(&self) {
            if let Some(pose) = self.pose {
                for listener in &self.listeners {
                    listener(&pose);
                }
            }
        }
    }

    // Applies every camera move instantly; good enough to observe targets.
    impl GlobeEngine for FakeEngine {
        fn attach_imagery(&mut self, provider: ImageryProvider) {
            self.imagery.push(provider);
        }

        fn attach_terrain(&mut self, provider: TerrainProvider) {
            self.terrain = Some(provider);
        }

        fn imagery_layer_count(&self) -> usize {
            self.imagery.len()
        }

        fn set_depth_test_against_terrain(&mut self, enabled: bool) {
            self.depth_test = enabled;
        }

        fn depth_test_against_terrain(&self) -> bool {
            self.depth_test
        }

        fn set_scene_mode(&mut self, mode: SceneMode) {
            self.scene_mode = mode;
        }

        fn scene_mode(&self) -> SceneMode {
            self.scene_mode
        }

        fn camera(&self) -> Option<CameraPose> {
            self.pose
        }

        fn fly_to(&mut self, flight: FlyTo) {
            let orientation = flight.orientation.unwrap_or_default();
            self.pose = Some(CameraPose {
                lon_deg: flight.destination.longitude,
                lat_deg: flight.destination.latitude,
                height_m: flight.destination.elevation,
                heading_rad: orientation.heading_rad,
                pitch_rad: orientation.pitch_rad,
                roll_rad: orientation.roll_rad,
            });
            self.notify();
        }

        fn zoom_in(&mut self, meters: f64) {
            if let Some(pose) = &mut self.pose {
                pose.height_m -= meters;
            }
            self.notify();
        }

        fn zoom_out(&mut self, meters: f64) {
            if let Some(pose) = &mut self.pose {
                pose.height_m += meters;
            }
            self.notify();
        }

        fn add_entity(&mut self, spec: EntitySpec) -> EntityHandle {
            let handle = EntityHandle(self.next_handle);
            self.next_handle += 1;
            self.entities.push((handle, spec));
            handle
        }

        fn remove_entity(&mut self, handle: EntityHandle) -> bool {
            let before = self.entities.len();
            self.entities.retain(|(h, _)| *h != handle);
            self.entities.len() != before
        }

        fn entity_by_identifier(&self, identifier: &str) -> Option<EntityHandle> {
            self.entities
                .iter()
                .find(|(_, spec)| spec.identifier == identifier)
                .map(|(handle, _)| *handle)
        }

        fn entity_spec(&self, handle: EntityHandle) -> Option<&EntitySpec> {
            self.entities
                .iter()
                .find(|(h, _)| *h == handle)
                .map(|(_, spec)| spec)
        }

        fn entity_count(&self) -> usize {
            self.entities.len()
        }

        fn add_camera_listener(&mut self, listener: CameraListener) {
            self.listeners.push(listener);
        }

        fn remove_camera_listener(&mut self, listener: &CameraListener) {
            self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
        }

        fn update(&mut self, _dt_s: f64) {}
    }

    struct FakeFactory {
        created: Rc<Cell<u32>>,
    }

    impl EngineFactory for FakeFactory {
        fn create(
            &self,
            surface: &dyn ShellSurface,
            container_id: &str,
            options: &crate::config::ViewerOptions,
        ) -> Result<Box<dyn GlobeEngine>, ViewerError> {
            if !surface.has_mount_point(container_id) {
                return Err(ViewerError::MountPointMissing(container_id.to_string()));
            }
            self.created.set(self.created.get() + 1);
            Ok(Box::new(FakeEngine::new(options.scene_mode)))
        }
    }

    struct ArrowProbe {
        rotation: Cell<f64>,
    }

    impl RotatableElement for ArrowProbe {
        fn set_rotation_deg(&self, degrees: f64) {
            self.rotation.set(degrees);
        }
    }

    struct TestSurface {
        mounts: Vec<String>,
        arrow: Option<Rc<ArrowProbe>>,
    }

    impl ShellSurface for TestSurface {
        fn has_mount_point(&self, id: &str) -> bool {
            self.mounts.iter().any(|m| m == id)
        }

        fn rotatable_element(&self, id: &str) -> Option<Rc<dyn RotatableElement>> {
            if id == NORTH_ARROW_ELEMENT {
                self.arrow
                    .as_ref()
                    .map(|a| Rc::clone(a) as Rc<dyn RotatableElement>)
            } else {
                None
            }
        }
    }

    fn test_config() -> ViewerConfig {
        ViewerConfig::new(
            "globe-container",
            ImageryProvider::wms(
                "Bhuvan WMS",
                "https://bhuvan-ras1.nrsc.gov.in/tilecache/tilecache.py",
                "bhuvan_img",
            ),
            TerrainProvider::quantized(
                "cdem_10m_2016",
                "https://vedas.sac.gov.in/elevation/cdem_10m_2016/",
            ),
        )
    }

    fn manager_with(surface: TestSurface) -> (ViewerManager, Rc<Cell<u32>>) {
        let created = Rc::new(Cell::new(0));
        let manager = ViewerManager::new(
            test_config(),
            Box::new(FakeFactory {
                created: Rc::clone(&created),
            }),
            Rc::new(surface),
        );
        (manager, created)
    }

    fn mounted_surface() -> TestSurface {
        TestSurface {
            mounts: vec!["globe-container".to_string()],
            arrow: None,
        }
    }

    #[test]
    fn init_is_idempotent_and_keeps_one_base_layer() {
        let (mut manager, created) = manager_with(mounted_surface());
        let first = manager.init().unwrap();
        let second = manager.init().unwrap();
        assert_eq!(first, second);
        assert_eq!(created.get(), 1);
        assert_eq!(manager.engine().unwrap().imagery_layer_count(), 1);
    }

    #[test]
    fn init_fails_on_missing_mount_point() {
        let (mut manager, created) = manager_with(TestSurface {
            mounts: Vec::new(),
            arrow: None,
        });
        assert!(matches!(
            manager.init(),
            Err(ViewerError::MountPointMissing(_))
        ));
        assert_eq!(created.get(), 0);
        assert!(!manager.is_initialized());
    }

    #[test]
    fn init_disables_depth_test_and_jumps_home() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();
        let engine = manager.engine().unwrap();
        assert!(!engine.depth_test_against_terrain());

        let pose = engine.camera().unwrap();
        assert_eq!(pose.lon_deg, 78.9629);
        assert_eq!(pose.lat_deg, 20.5937);
        assert_eq!(pose.height_m, 20_000_000.0);
        assert_eq!(pose.heading_rad, 0.0);
        assert_eq!(pose.pitch_rad, -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn operations_before_init_are_no_ops() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.render_graphic(&GraphicEntity::new("g", vec![Coordinates::new(77.0, 13.0)]));
        manager.remove_graphic("g");
        manager.zoom_to_coordinates(&Coordinates::new(77.0, 13.0));
        manager.orient_to_north();
        manager.zoom_in();
        manager.zoom_out();
        manager.set_scene_mode("2D");
        manager.tick(0.016);
        assert_eq!(
            manager.get_scene_information(),
            SceneInformation {
                coordinates: Coordinates::default(),
                terrain_type: "N/A".to_string(),
                imagery_type: "N/A".to_string(),
                heading_deg: 0.0,
            }
        );
    }

    #[test]
    fn one_point_renders_a_point_and_many_render_a_polygon() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();

        manager.render_graphic(&GraphicEntity::new(
            "site",
            vec![Coordinates::new(77.59, 12.97)],
        ));
        let vertices_in = vec![
            Coordinates::new(77.0, 13.0),
            Coordinates::new(78.0, 13.0),
            Coordinates::new(78.0, 14.0),
        ];
        manager.render_graphic(&GraphicEntity::new("area", vertices_in.clone()));

        let engine = manager.engine().unwrap();
        assert_eq!(engine.entity_count(), 2);

        let point = engine
            .entity_spec(engine.entity_by_identifier("site").unwrap())
            .unwrap();
        assert_eq!(point.kind(), GraphicKind::Point);

        let polygon = engine
            .entity_spec(engine.entity_by_identifier("area").unwrap())
            .unwrap();
        match &polygon.graphic {
            Graphic::Polygon { vertices, .. } => assert_eq!(vertices, &vertices_in),
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn empty_geometry_is_ignored() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();
        manager.render_graphic(&GraphicEntity::new("empty", Vec::new()));
        assert_eq!(manager.engine().unwrap().entity_count(), 0);
    }

    #[test]
    fn duplicate_identifiers_create_duplicate_entities() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();
        let graphic = GraphicEntity::new("dup", vec![Coordinates::new(77.0, 13.0)]);
        manager.render_graphic(&graphic);
        manager.render_graphic(&graphic);
        assert_eq!(manager.engine().unwrap().entity_count(), 2);
    }

    #[test]
    fn remove_graphic_is_idempotent() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();
        manager.render_graphic(&GraphicEntity::new("g", vec![Coordinates::new(77.0, 13.0)]));
        manager.remove_graphic("g");
        assert_eq!(manager.engine().unwrap().entity_count(), 0);
        manager.remove_graphic("g");
        assert_eq!(manager.engine().unwrap().entity_count(), 0);
    }

    #[test]
    fn low_elevations_are_replaced_with_the_default_height() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();

        manager.zoom_to_coordinates(&Coordinates::with_elevation(77.59, 12.97, 500.0));
        assert_eq!(manager.engine().unwrap().camera().unwrap().height_m, 25_000.0);

        manager.zoom_to_coordinates(&Coordinates::with_elevation(77.59, 12.97, 5_000.0));
        assert_eq!(manager.engine().unwrap().camera().unwrap().height_m, 5_000.0);
    }

    #[test]
    fn at_most_one_location_marker_exists() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();

        manager.display_location_marker(&NamedLocation::new(
            "blr",
            "Bengaluru",
            Some(Coordinates::new(77.59, 12.97)),
        ));
        manager.display_location_marker(&NamedLocation::new(
            "del",
            "Delhi",
            Some(Coordinates::new(77.21, 28.61)),
        ));

        let engine = manager.engine().unwrap();
        assert_eq!(engine.entity_count(), 1);
        assert!(engine.entity_by_identifier("location-label-blr").is_none());
        assert!(engine.entity_by_identifier("location-label-del").is_some());
    }

    #[test]
    fn unresolved_location_still_clears_the_previous_marker() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();

        manager.display_location_marker(&NamedLocation::new(
            "blr",
            "Bengaluru",
            Some(Coordinates::new(77.59, 12.97)),
        ));
        manager.display_location_marker(&NamedLocation::new("nowhere", "Nowhere", None));
        assert_eq!(manager.engine().unwrap().entity_count(), 0);
    }

    #[test]
    fn orient_to_north_preserves_pitch_and_roll() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();

        // Simulate user interaction leaving the camera rotated.
        manager.engine_mut().unwrap().fly_to(FlyTo::with_orientation(
            Coordinates::with_elevation(76.0, 10.0, 80_000.0),
            CameraOrientation {
                heading_rad: 1.2,
                pitch_rad: -0.5,
                roll_rad: 0.1,
            },
            0.0,
        ));

        manager.orient_to_north();
        let pose = manager.engine().unwrap().camera().unwrap();
        assert_eq!(pose.heading_rad, 0.0);
        assert_eq!(pose.pitch_rad, -0.5);
        assert_eq!(pose.roll_rad, 0.1);
        assert_eq!(pose.lon_deg, 76.0);
        assert_eq!(pose.lat_deg, 10.0);
        assert_eq!(pose.height_m, 80_000.0);
    }

    #[test]
    fn zoom_steps_are_relative_to_current_height() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();
        manager.zoom_to_coordinates(&Coordinates::with_elevation(77.0, 13.0, 100_000.0));

        manager.zoom_in();
        assert_eq!(manager.engine().unwrap().camera().unwrap().height_m, 50_000.0);

        manager.zoom_out();
        assert_eq!(manager.engine().unwrap().camera().unwrap().height_m, 100_000.0);
    }

    #[test]
    fn unrecognized_scene_mode_is_rejected() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();
        manager.set_scene_mode("2D");
        assert_eq!(manager.engine().unwrap().scene_mode(), SceneMode::Scene2D);
        manager.set_scene_mode("orthographic");
        assert_eq!(manager.engine().unwrap().scene_mode(), SceneMode::Scene2D);
    }

    #[test]
    fn scene_information_reads_attached_provider_labels() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();
        let info = manager.get_scene_information();
        assert_eq!(info.terrain_type, "cdem_10m_2016");
        assert_eq!(info.imagery_type, "Bhuvan WMS");
        assert_eq!(info.heading_deg, 0.0);
        assert_eq!(info.coordinates.longitude, 78.9629);
    }

    #[test]
    fn destroy_resets_and_allows_reinit() {
        let (mut manager, created) = manager_with(mounted_surface());
        manager.init().unwrap();
        manager.render_graphic(&GraphicEntity::new("g", vec![Coordinates::new(77.0, 13.0)]));

        manager.destroy();
        assert!(!manager.is_initialized());
        assert_eq!(manager.get_scene_information().terrain_type, "N/A");
        manager.destroy(); // second call is a no-op

        manager.init().unwrap();
        assert_eq!(created.get(), 2);
        assert_eq!(manager.engine().unwrap().entity_count(), 0);
    }

    #[test]
    fn north_arrow_follows_camera_heading() {
        let arrow = Rc::new(ArrowProbe {
            rotation: Cell::new(45.0),
        });
        let (mut manager, _) = manager_with(TestSurface {
            mounts: vec!["globe-container".to_string()],
            arrow: Some(Rc::clone(&arrow)),
        });
        manager.init().unwrap();
        // The home fly-to fired the listener with heading 0.
        assert_eq!(arrow.rotation.get(), 0.0);

        manager.engine_mut().unwrap().fly_to(FlyTo::with_orientation(
            Coordinates::with_elevation(76.0, 10.0, 80_000.0),
            CameraOrientation {
                heading_rad: std::f64::consts::FRAC_PI_2,
                pitch_rad: -1.0,
                roll_rad: 0.0,
            },
            0.0,
        ));
        assert!((arrow.rotation.get() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn camera_listener_removal_uses_reference_identity() {
        let (mut manager, _) = manager_with(mounted_surface());
        manager.init().unwrap();

        let hits = Rc::new(Cell::new(0u32));
        let hits_l = Rc::clone(&hits);
        let listener: CameraListener = Rc::new(move |_| hits_l.set(hits_l.get() + 1));

        manager.add_camera_change_listener(&listener);
        manager.zoom_to_coordinates(&Coordinates::with_elevation(77.0, 13.0, 50_000.0));
        assert_eq!(hits.get(), 1);

        manager.remove_camera_change_listener(&listener);
        manager.zoom_to_coordinates(&Coordinates::with_elevation(78.0, 14.0, 50_000.0));
        assert_eq!(hits.get(), 1);
    }
}

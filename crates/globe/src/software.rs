//! In-memory globe engine.
//!
//! Implements the full [`GlobeEngine`] capability without a GPU: camera pose,
//! time-based fly-to transitions, entity bookkeeping and layer slots. The
//! demo shell and the test suites run against it; a hardware renderer plugs
//! into the same trait.

use std::rc::Rc;

use foundation::math::{Coordinates, Ecef, geodetic_to_ecef, lerp_angle_rad};
use layers::{ImageryProvider, TerrainProvider};
use viewer::{
    CameraListener, CameraPose, EngineFactory, EntityHandle, EntitySpec, FlyTo, GlobeEngine,
    Graphic, SceneMode, ShellSurface, ViewerError, ViewerOptions,
};

/// Camera never goes below this height above the ellipsoid.
const MIN_CAMERA_HEIGHT_M: f64 = 10.0;

/// An in-flight camera transition.
#[derive(Debug, Clone)]
struct Flight {
    from: CameraPose,
    to: CameraPose,
    duration_s: f64,
    elapsed_s: f64,
}

struct EntityRecord {
    handle: EntityHandle,
    spec: EntitySpec,
    /// Scene-space positions, precomputed once at insertion.
    #[allow(dead_code)]
    positions_ecef: Vec<Ecef>,
}

pub struct SoftwareGlobe {
    imagery: Vec<ImageryProvider>,
    terrain: Option<TerrainProvider>,
    depth_test_against_terrain: bool,
    scene_mode: SceneMode,
    terrain_exaggeration: f64,
    entities: Vec<EntityRecord>,
    next_handle: u64,
    pose: Option<CameraPose>,
    flight: Option<Flight>,
    listeners: Vec<CameraListener>,
}

impl SoftwareGlobe {
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            imagery: Vec::new(),
            terrain: None,
            depth_test_against_terrain: true,
            scene_mode: options.scene_mode,
            terrain_exaggeration: options.terrain_exaggeration,
            entities: Vec::new(),
            next_handle: 0,
            pose: None,
            flight: None,
            listeners: Vec::new(),
        }
    }

    pub fn terrain_exaggeration(&self) -> f64 {
        self.terrain_exaggeration
    }

    /// Sets the camera directly, cancelling any in-flight transition. Used
    /// when an external interaction layer (mouse, touch) drives the camera.
    pub fn set_camera(&mut self, pose: CameraPose) {
        self.flight = None;
        self.pose = Some(pose);
        self.notify();
    }

    pub fn is_in_flight(&self) -> bool {
        self.flight.is_some()
    }

    fn notify(&self) {
        let Some(pose) = self.pose else {
            return;
        };
        for listener in &self.listeners {
            listener(&pose);
        }
    }
}

fn pose_for(destination: Coordinates, flight: &FlyTo) -> CameraPose {
    let orientation = flight.orientation.unwrap_or_default();
    CameraPose {
        lon_deg: destination.longitude,
        lat_deg: destination.latitude,
        height_m: destination.elevation,
        heading_rad: orientation.heading_rad,
        pitch_rad: orientation.pitch_rad,
        roll_rad: orientation.roll_rad,
    }
}

fn lerp_pose(from: &CameraPose, to: &CameraPose, t: f64) -> CameraPose {
    CameraPose {
        lon_deg: lerp_angle_rad(from.lon_deg.to_radians(), to.lon_deg.to_radians(), t)
            .to_degrees(),
        lat_deg: from.lat_deg + (to.lat_deg - from.lat_deg) * t,
        height_m: from.height_m + (to.height_m - from.height_m) * t,
        heading_rad: lerp_angle_rad(from.heading_rad, to.heading_rad, t),
        pitch_rad: lerp_angle_rad(from.pitch_rad, to.pitch_rad, t),
        roll_rad: lerp_angle_rad(from.roll_rad, to.roll_rad, t),
    }
}

fn scene_positions(spec: &EntitySpec) -> Vec<Ecef> {
    let coordinates: Vec<Coordinates> = match &spec.graphic {
        Graphic::Point { position, .. } | Graphic::Label { position, .. } => vec![*position],
        Graphic::Polygon { vertices, .. } => vertices.clone(),
    };
    coordinates
        .into_iter()
        .map(|c| geodetic_to_ecef(c.to_geodetic()))
        .collect()
}

impl GlobeEngine for SoftwareGlobe {
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
        self.depth_test_against_terrain = enabled;
    }

    fn depth_test_against_terrain(&self) -> bool {
        self.depth_test_against_terrain
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
        let to = pose_for(flight.destination, &flight);
        match self.pose {
            // A new fly-to supersedes whatever was in flight.
            Some(from) if flight.duration_s > 0.0 => {
                self.flight = Some(Flight {
                    from,
                    to,
                    duration_s: flight.duration_s,
                    elapsed_s: 0.0,
                });
            }
            // Unresolved camera or zero duration: arrive immediately.
            _ => {
                self.flight = None;
                self.pose = Some(to);
                self.notify();
            }
        }
    }

    fn zoom_in(&mut self, meters: f64) {
        let Some(mut pose) = self.pose else {
            return;
        };
        pose.height_m = (pose.height_m - meters).max(MIN_CAMERA_HEIGHT_M);
        self.flight = None;
        self.pose = Some(pose);
        self.notify();
    }

    fn zoom_out(&mut self, meters: f64) {
        let Some(mut pose) = self.pose else {
            return;
        };
        pose.height_m += meters;
        self.flight = None;
        self.pose = Some(pose);
        self.notify();
    }

    fn add_entity(&mut self, spec: EntitySpec) -> EntityHandle {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        let positions_ecef = scene_positions(&spec);
        self.entities.push(EntityRecord {
            handle,
            spec,
            positions_ecef,
        });
        handle
    }

    fn remove_entity(&mut self, handle: EntityHandle) -> bool {
        let before = self.entities.len();
        self.entities.retain(|record| record.handle != handle);
        self.entities.len() != before
    }

    fn entity_by_identifier(&self, identifier: &str) -> Option<EntityHandle> {
        self.entities
            .iter()
            .find(|record| record.spec.identifier == identifier)
            .map(|record| record.handle)
    }

    fn entity_spec(&self, handle: EntityHandle) -> Option<&EntitySpec> {
        self.entities
            .iter()
            .find(|record| record.handle == handle)
            .map(|record| &record.spec)
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

    fn update(&mut self, dt_s: f64) {
        let Some(mut flight) = self.flight.take() else {
            return;
        };
        flight.elapsed_s += dt_s.max(0.0);
        let t = if flight.duration_s > 0.0 {
            (flight.elapsed_s / flight.duration_s).min(1.0)
        } else {
            1.0
        };
        let pose = lerp_pose(&flight.from, &flight.to, t);
        if t < 1.0 {
            self.flight = Some(flight);
        }
        self.pose = Some(pose);
        self.notify();
    }
}

/// Builds [`SoftwareGlobe`] instances bound to a shell mount point.
pub struct SoftwareGlobeFactory;

impl EngineFactory for SoftwareGlobeFactory {
    fn create(
        &self,
        surface: &dyn ShellSurface,
        container_id: &str,
        options: &ViewerOptions,
    ) -> Result<Box<dyn GlobeEngine>, ViewerError> {
        if !surface.has_mount_point(container_id) {
            return Err(ViewerError::MountPointMissing(container_id.to_string()));
        }
        Ok(Box::new(SoftwareGlobe::new(options)))
    }
}

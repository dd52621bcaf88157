//! The rendering-engine capability the viewer manager drives.
//!
//! The manager never reaches into engine internals; everything it needs from
//! the 3D engine is expressed here as a trait so the engine stays an injected
//! collaborator (a GPU-backed globe in production, an in-memory globe in
//! tests and the demo shell).

use std::rc::Rc;

use foundation::math::Coordinates;
use layers::{ImageryProvider, TerrainProvider};

use crate::config::{SceneMode, ViewerOptions};
use crate::entities::EntitySpec;
use crate::error::ViewerError;

/// Camera position and orientation.
///
/// Position in degrees/meters, orientation in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub height_m: f64,
    pub heading_rad: f64,
    pub pitch_rad: f64,
    pub roll_rad: f64,
}

impl CameraPose {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::with_elevation(self.lon_deg, self.lat_deg, self.height_m)
    }
}

/// Camera orientation in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraOrientation {
    pub heading_rad: f64,
    pub pitch_rad: f64,
    pub roll_rad: f64,
}

impl Default for CameraOrientation {
    /// Looking straight down, facing north.
    fn default() -> Self {
        Self {
            heading_rad: 0.0,
            pitch_rad: -std::f64::consts::FRAC_PI_2,
            roll_rad: 0.0,
        }
    }
}

/// An animated camera transition.
///
/// The call starting a fly-to returns immediately; the transition progresses
/// against the render loop. Issuing a new fly-to before the previous one
/// completes supersedes it (last write wins on the camera target).
#[derive(Debug, Clone, PartialEq)]
pub struct FlyTo {
    pub destination: Coordinates,
    /// `None` keeps the engine's default arrival orientation (straight down,
    /// facing north).
    pub orientation: Option<CameraOrientation>,
    pub duration_s: f64,
}

impl FlyTo {
    pub fn new(destination: Coordinates, duration_s: f64) -> Self {
        Self {
            destination,
            orientation: None,
            duration_s,
        }
    }

    pub fn with_orientation(
        destination: Coordinates,
        orientation: CameraOrientation,
        duration_s: f64,
    ) -> Self {
        Self {
            destination,
            orientation: Some(orientation),
            duration_s,
        }
    }
}

/// Callback invoked whenever the camera moves.
///
/// Removal is by callback reference: keep the `Rc` you registered.
pub type CameraListener = Rc<dyn Fn(&CameraPose)>;

/// Stable per-instance entity handle, unique within one engine instance even
/// across caller-supplied identifier collisions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

/// Identifies one live viewer instance owned by a manager.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ViewerId(pub u64);

/// Fixed lookup path of the north-indicator element on the shell surface.
pub const NORTH_ARROW_ELEMENT: &str = "north-arrow";

/// A visual element the shell exposes for rotation (the north arrow).
pub trait RotatableElement {
    fn set_rotation_deg(&self, degrees: f64);
}

/// The hosting shell's rendering-surface layer.
///
/// Provides mount points for the viewer and named auxiliary elements.
pub trait ShellSurface {
    fn has_mount_point(&self, id: &str) -> bool;
    fn rotatable_element(&self, id: &str) -> Option<Rc<dyn RotatableElement>>;
}

/// Everything the viewer manager asks of the 3D engine.
pub trait GlobeEngine {
    /// Appends an imagery layer; the first attached layer is the base layer.
    fn attach_imagery(&mut self, provider: ImageryProvider);
    fn attach_terrain(&mut self, provider: TerrainProvider);
    fn imagery_layer_count(&self) -> usize;

    fn set_depth_test_against_terrain(&mut self, enabled: bool);
    fn depth_test_against_terrain(&self) -> bool;
    fn set_scene_mode(&mut self, mode: SceneMode);
    fn scene_mode(&self) -> SceneMode;

    /// `None` until the first render pass resolves a camera position.
    fn camera(&self) -> Option<CameraPose>;
    fn fly_to(&mut self, flight: FlyTo);
    /// Moves the camera toward the surface by `meters`.
    fn zoom_in(&mut self, meters: f64);
    /// Moves the camera away from the surface by `meters`.
    fn zoom_out(&mut self, meters: f64);

    fn add_entity(&mut self, spec: EntitySpec) -> EntityHandle;
    fn remove_entity(&mut self, handle: EntityHandle) -> bool;
    fn entity_by_identifier(&self, identifier: &str) -> Option<EntityHandle>;
    fn entity_spec(&self, handle: EntityHandle) -> Option<&EntitySpec>;
    fn entity_count(&self) -> usize;

    fn add_camera_listener(&mut self, listener: CameraListener);
    /// Removes the registration matching `listener` by reference identity.
    fn remove_camera_listener(&mut self, listener: &CameraListener);

    /// Render-loop tick; advances in-flight camera transitions.
    fn update(&mut self, dt_s: f64);
}

/// Constructs engine instances bound to a mount point on the shell surface.
///
/// Construction is the one operation allowed to fail hard: a missing or
/// invalid mount point is a broken configuration, not a runtime condition to
/// paper over.
pub trait EngineFactory {
    fn create(
        &self,
        surface: &dyn ShellSurface,
        container_id: &str,
        options: &ViewerOptions,
    ) -> Result<Box<dyn GlobeEngine>, ViewerError>;
}

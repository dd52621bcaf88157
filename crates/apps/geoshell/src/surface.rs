//! The demo shell's rendering-surface layer: a static registry of mount
//! points and named elements standing in for the hosting window system.

use std::cell::Cell;
use std::rc::Rc;

use viewer::{RotatableElement, ShellSurface};

/// The north-indicator widget; stores the rotation a real shell would apply
/// as a CSS transform.
#[derive(Debug, Default)]
pub struct NorthArrow {
    rotation_deg: Cell<f64>,
}

impl NorthArrow {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg.get()
    }
}

impl RotatableElement for NorthArrow {
    fn set_rotation_deg(&self, degrees: f64) {
        self.rotation_deg.set(degrees);
    }
}

#[derive(Default)]
pub struct StaticSurface {
    mount_points: Vec<String>,
    elements: Vec<(String, Rc<dyn RotatableElement>)>,
}

impl StaticSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mount_point(&mut self, id: impl Into<String>) {
        self.mount_points.push(id.into());
    }

    pub fn add_rotatable_element(
        &mut self,
        id: impl Into<String>,
        element: Rc<dyn RotatableElement>,
    ) {
        self.elements.push((id.into(), element));
    }
}

impl ShellSurface for StaticSurface {
    fn has_mount_point(&self, id: &str) -> bool {
        self.mount_points.iter().any(|m| m == id)
    }

    fn rotatable_element(&self, id: &str) -> Option<Rc<dyn RotatableElement>> {
        self.elements
            .iter()
            .find(|(e, _)| e == id)
            .map(|(_, element)| Rc::clone(element))
    }
}

use foundation::math::Coordinates;

/// A caller-supplied overlay graphic: an identifier plus an ordered sequence
/// of geographic points.
///
/// One point renders as a point marker; two or more render as a closed
/// polygon with the points as hierarchy vertices in the order given.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicEntity {
    pub identifier: String,
    pub geometry: Vec<Coordinates>,
}

impl GraphicEntity {
    pub fn new(identifier: impl Into<String>, geometry: Vec<Coordinates>) -> Self {
        Self {
            identifier: identifier.into(),
            geometry,
        }
    }
}

/// A named place that can be marked on the globe.
///
/// The coordinate accessor may legitimately return `None` (a location whose
/// position is not yet resolved); displaying such a location still clears the
/// previous marker.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedLocation {
    pub identifier: String,
    pub name: String,
    coordinates: Option<Coordinates>,
}

impl NamedLocation {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            coordinates,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointStyle {
    pub pixel_size: f32,
    pub color: [f32; 4],
    pub outline_color: [f32; 4],
    pub outline_width: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            pixel_size: 10.0,
            color: [1.0, 0.0, 0.0, 1.0],
            outline_color: [1.0, 1.0, 1.0, 1.0],
            outline_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyle {
    pub fill_color: [f32; 4],
    pub outline: bool,
    pub outline_color: [f32; 4],
    pub outline_width: f32,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: [0.0, 0.0, 1.0, 0.5],
            outline: true,
            outline_color: [0.0, 0.0, 0.0, 1.0],
            outline_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font: String,
    pub fill_color: [f32; 4],
    pub outline_color: [f32; 4],
    pub outline_width: f32,
    /// Screen-space offset in pixels, y negative is up.
    pub pixel_offset: [f32; 2],
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font: "14pt Poppins, sans-serif".to_string(),
            fill_color: [1.0, 1.0, 1.0, 1.0],
            outline_color: [0.0, 0.0, 0.0, 1.0],
            outline_width: 2.0,
            pixel_offset: [0.0, -20.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    Point {
        position: Coordinates,
        style: PointStyle,
    },
    Polygon {
        vertices: Vec<Coordinates>,
        style: PolygonStyle,
    },
    Label {
        position: Coordinates,
        text: String,
        style: LabelStyle,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GraphicKind {
    Point,
    Polygon,
    Label,
}

/// A fully-resolved entity handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec {
    pub identifier: String,
    pub graphic: Graphic,
}

impl EntitySpec {
    pub fn point(identifier: impl Into<String>, position: Coordinates) -> Self {
        Self {
            identifier: identifier.into(),
            graphic: Graphic::Point {
                position,
                style: PointStyle::default(),
            },
        }
    }

    pub fn polygon(identifier: impl Into<String>, vertices: Vec<Coordinates>) -> Self {
        Self {
            identifier: identifier.into(),
            graphic: Graphic::Polygon {
                vertices,
                style: PolygonStyle::default(),
            },
        }
    }

    pub fn label(
        identifier: impl Into<String>,
        position: Coordinates,
        text: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            graphic: Graphic::Label {
                position,
                text: text.into(),
                style: LabelStyle::default(),
            },
        }
    }

    pub fn kind(&self) -> GraphicKind {
        match self.graphic {
            Graphic::Point { .. } => GraphicKind::Point,
            Graphic::Polygon { .. } => GraphicKind::Polygon,
            Graphic::Label { .. } => GraphicKind::Label,
        }
    }
}

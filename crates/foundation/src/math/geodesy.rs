use super::Ecef;

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
/// WGS84 second eccentricity squared.
pub const WGS84_EP2: f64 = (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);

/// Geographic coordinates in degrees and meters.
///
/// This is the unit convention of the viewer-facing API: longitude/latitude in
/// degrees, elevation in meters above the ellipsoid. Internal math uses
/// [`Geodetic`] (radians).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            elevation: 0.0,
        }
    }

    pub fn with_elevation(longitude: f64, latitude: f64, elevation: f64) -> Self {
        Self {
            longitude,
            latitude,
            elevation,
        }
    }

    pub fn to_geodetic(self) -> Geodetic {
        Geodetic::new(
            self.latitude.to_radians(),
            self.longitude.to_radians(),
            self.elevation,
        )
    }
}

/// Geodetic coordinates in radians and meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geodetic {
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub alt_m: f64,
}

impl Geodetic {
    pub fn new(lat_rad: f64, lon_rad: f64, alt_m: f64) -> Self {
        Self {
            lat_rad,
            lon_rad,
            alt_m,
        }
    }

    pub fn to_coordinates(self) -> Coordinates {
        Coordinates::with_elevation(
            self.lon_rad.to_degrees(),
            self.lat_rad.to_degrees(),
            self.alt_m,
        )
    }
}

pub fn geodetic_to_ecef(geo: Geodetic) -> Ecef {
    let sin_lat = geo.lat_rad.sin();
    let cos_lat = geo.lat_rad.cos();
    let sin_lon = geo.lon_rad.sin();
    let cos_lon = geo.lon_rad.cos();

    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let x = (n + geo.alt_m) * cos_lat * cos_lon;
    let y = (n + geo.alt_m) * cos_lat * sin_lon;
    let z = (n * (1.0 - WGS84_E2) + geo.alt_m) * sin_lat;

    Ecef::new(x, y, z)
}

pub fn ecef_to_geodetic(ecef: Ecef) -> Geodetic {
    let p = (ecef.x * ecef.x + ecef.y * ecef.y).sqrt();
    let lon = ecef.y.atan2(ecef.x);

    let theta = (ecef.z * WGS84_A).atan2(p * WGS84_B);
    let sin_theta = theta.sin();
    let cos_theta = theta.cos();

    let lat = (ecef.z + WGS84_EP2 * WGS84_B * sin_theta * sin_theta * sin_theta)
        .atan2(p - WGS84_E2 * WGS84_A * cos_theta * cos_theta * cos_theta);

    let sin_lat = lat.sin();
    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let alt = p / lat.cos() - n;

    Geodetic::new(lat, lon, alt)
}

/// Interpolates between two angles (radians) along the shorter arc.
pub fn lerp_angle_rad(from: f64, to: f64, t: f64) -> f64 {
    let tau = std::f64::consts::TAU;
    let mut delta = (to - from) % tau;
    if delta > std::f64::consts::PI {
        delta -= tau;
    } else if delta < -std::f64::consts::PI {
        delta += tau;
    }
    from + delta * t
}

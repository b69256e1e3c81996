pub mod activity;
pub mod collection;
pub mod document;
pub mod error;
pub mod gpxxml;
pub mod report;
pub mod scan;

pub use crate::activity::{Activity, ActivityType, extract};
pub use crate::collection::{ActivityCollection, Rankings, ranks_before};
pub use crate::document::{TrackDocument, TrackNode};
pub use crate::error::{DocumentError, Error};
pub use crate::gpxxml::XmlDocument;
pub use crate::scan::{ScanOptions, ScanSummary, load_activity, scan_directory};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Calculates the great circle distance in meters between two GPS coordinates
/// given in decimal degrees, using the haversine formula.
///
/// The atan2 form stays well conditioned for both near-identical and antipodal
/// points, where the spherical law of cosines loses precision. Coordinates are
/// not validated.
///
/// References:
/// - R.W. Sinnott, "Virtues of the Haversine", Sky and Telescope, vol. 68, no. 2, 1984, p. 159
/// - https://www.movable-type.co.uk/scripts/latlong.html
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = to_radians(lat1);
    let lat2_rad = to_radians(lat2);
    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = to_radians(lon2) - to_radians(lon1);

    // a = sin²(Δφ/2) + cos φ1 ⋅ cos φ2 ⋅ sin²(Δλ/2)
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // c = 2 ⋅ atan2(√a, √(1−a))
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

use std::fmt;

use time::PrimitiveDateTime;
use time::macros::format_description;
use tracing::trace;

use crate::distance_meters;
use crate::document::{TrackDocument, TrackNode};
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityType {
    Running,
    Walking,
    Other(String),
}

impl ActivityType {
    /// Classifies a track by its name, e.g. `"Running 2023-01-01"`.
    ///
    /// The type is the text before the first digit minus its last character,
    /// which is the separator in the recorder's naming scheme. Names without a
    /// digit, or starting with one, are rejected.
    pub fn from_track_name(name: &str) -> Result<Self, Error> {
        match name.find(|c: char| c.is_ascii_digit()) {
            None | Some(0) => Err(Error::Naming(name.to_string())),
            Some(pos) => {
                let prefix = &name[..pos];
                let end = prefix.char_indices().last().map_or(0, |(i, _)| i);
                Ok(ActivityType::from(&prefix[..end]))
            }
        }
    }
}

impl From<&str> for ActivityType {
    fn from(s: &str) -> Self {
        match s {
            "Running" => ActivityType::Running,
            "Walking" => ActivityType::Walking,
            other => ActivityType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Running => write!(f, "Running"),
            ActivityType::Walking => write!(f, "Walking"),
            ActivityType::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Totals measured from one track file.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub activity_type: ActivityType,
    pub start_time: String,
    pub total_distance_meters: f64,
    pub total_duration_seconds: u64,
    pub pace_seconds_per_km: f64,
    pub segment_count: usize,
}

/// Parses a track point time in the strict `YYYY-MM-DDTHH:MM:SSZ` form and
/// returns it as seconds since the Unix epoch.
pub fn parse_point_time(text: &str) -> Option<i64> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
    PrimitiveDateTime::parse(text, format)
        .ok()
        .map(|time| time.assume_utc().unix_timestamp())
}

/// Measures the first track of a parsed GPX document.
///
/// Distance is summed between consecutive points inside each segment, never
/// across segment boundaries. Each segment contributes the span between its
/// earliest and latest point time, so pauses between segments are not
/// counted. Any structural problem fails the whole track.
pub fn extract<D: TrackDocument>(document: &D) -> Result<Activity, Error> {
    let track = document
        .root()
        .ok_or(Error::Structure("root element"))?
        .first_child(None)
        .ok_or(Error::Structure("track"))?;

    let name = track
        .first_child(Some("name"))
        .and_then(|name| name.text())
        .ok_or(Error::Structure("track name"))?;
    let activity_type = ActivityType::from_track_name(&name)?;

    let start_time = track
        .first_child(Some("time"))
        .and_then(|time| time.text())
        .ok_or(Error::Structure("track time"))?;

    let mut total_distance_meters = 0.0;
    let mut total_duration_seconds = 0;
    let mut segment_count = 0;

    for (segment_index, segment) in track.children("trkseg").enumerate() {
        let segment_no = segment_index + 1;
        let mut bounds: Option<(i64, i64)> = None;
        let mut previous: Option<(f64, f64)> = None;
        let mut segment_distance = 0.0;

        for (point_index, point) in segment.children("trkpt").enumerate() {
            let attribute_error = |attribute: &'static str| Error::Attribute {
                segment: segment_no,
                point: point_index + 1,
                attribute,
            };
            let lat = point.attr("lat").ok_or_else(|| attribute_error("lat"))?;
            let lon = point.attr("lon").ok_or_else(|| attribute_error("lon"))?;

            if let Some((prev_lat, prev_lon)) = previous {
                segment_distance += distance_meters(prev_lat, prev_lon, lat, lon);
            }
            previous = Some((lat, lon));

            let text = point
                .first_child(Some("time"))
                .and_then(|time| time.text())
                .unwrap_or_default();
            let timestamp = parse_point_time(&text).ok_or(Error::Timestamp {
                segment: segment_no,
                text,
            })?;

            bounds = Some(match bounds {
                None => (timestamp, timestamp),
                Some((min, max)) => (min.min(timestamp), max.max(timestamp)),
            });
        }

        let segment_duration = bounds.map_or(0, |(min, max)| (max - min) as u64);
        trace!(
            segment = segment_no,
            distance = segment_distance,
            duration = segment_duration,
            "measured segment"
        );

        total_duration_seconds += segment_duration;
        total_distance_meters += segment_distance;
        segment_count += 1;
    }

    if total_distance_meters == 0.0 {
        return Err(Error::EmptyTrack);
    }

    // Seconds needed for one kilometer at the average speed, also below 1 km.
    let pace_seconds_per_km = total_duration_seconds as f64 / (total_distance_meters / 1000.0);

    Ok(Activity {
        activity_type,
        start_time,
        total_distance_meters,
        total_duration_seconds,
        pace_seconds_per_km,
        segment_count,
    })
}

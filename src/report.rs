use std::io::{self, Write};

use crate::activity::Activity;
use crate::collection::{ActivityCollection, Rankings};

/// `H:MM:SS` when the duration reaches an hour, otherwise `MM:SS`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Pace in seconds per kilometer as `M:SS`, truncating fractions of a second.
pub fn format_pace(pace_seconds_per_km: f64) -> String {
    let total = pace_seconds_per_km as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn format_distance(meters: f64) -> String {
    format!("{meters:.1}")
}

fn write_section<W: Write>(out: &mut W, title: &str, collection: &ActivityCollection) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "================ {title} {} ================", collection.len())?;
    for activity in collection {
        writeln!(
            out,
            "{}, {}, {}, {}",
            activity.start_time,
            format_distance(activity.total_distance_meters),
            format_pace(activity.pace_seconds_per_km),
            format_duration(activity.total_duration_seconds)
        )?;
    }
    Ok(())
}

/// Writes the walking list, then the running list, each under a header with
/// its count.
pub fn write_rankings<W: Write>(out: &mut W, rankings: &Rankings) -> io::Result<()> {
    write_section(out, "WALKING", &rankings.walking)?;
    write_section(out, "RUNNING", &rankings.running)
}

pub fn write_details<W: Write>(out: &mut W, file: &str, activity: &Activity) -> io::Result<()> {
    writeln!(
        out,
        "File: {file}, type: {}, started: {}, distance: {}, duration: {}, pace: {}, segments: {}",
        activity.activity_type,
        activity.start_time,
        format_distance(activity.total_distance_meters),
        format_duration(activity.total_duration_seconds),
        format_pace(activity.pace_seconds_per_km),
        activity.segment_count
    )
}

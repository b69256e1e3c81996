use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::activity::{Activity, extract};
use crate::collection::Rankings;
use crate::error::{DocumentError, Error};
use crate::gpxxml::XmlDocument;
use crate::report::write_details;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Extension of the files to load, without the dot. Compared case-sensitively.
    pub extension: String,
    /// Write a detail line per loaded file instead of a progress dot.
    pub details: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            extension: "gpx".to_string(),
            details: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub rankings: Rankings,
    pub loaded: usize,
    pub failed: usize,
    pub skipped: usize,
}

pub fn load_activity(path: &Path) -> Result<Activity, Error> {
    let input = fs::read(path).map_err(DocumentError::from)?;
    let document = XmlDocument::parse(&input)?;
    extract(&document)
}

/// Loads every track file in `dir`, one at a time in file name order, and
/// ranks the results.
///
/// A file that cannot be measured is logged and left out; only an unreadable
/// directory or a failing `progress` writer stops the scan.
pub fn scan_directory<W: Write>(
    dir: &Path,
    options: &ScanOptions,
    progress: &mut W,
) -> Result<ScanSummary, Error> {
    let entries = fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "unreadable directory entry");
                None
            }
        })
        .collect();
    paths.sort();

    let extension = OsStr::new(&options.extension);
    let mut summary = ScanSummary::default();

    for path in paths {
        if !path.is_file() || path.extension() != Some(extension) {
            summary.skipped += 1;
            continue;
        }

        let activity = match load_activity(&path) {
            Ok(activity) => activity,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping track file");
                summary.failed += 1;
                continue;
            }
        };

        debug!(
            file = %path.display(),
            activity_type = %activity.activity_type,
            distance = activity.total_distance_meters,
            duration = activity.total_duration_seconds,
            segments = activity.segment_count,
            "loaded activity"
        );
        summary.loaded += 1;

        if options.details {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            write_details(progress, &name, &activity)?;
        } else {
            write!(progress, ".")?;
            progress.flush()?;
        }

        summary.rankings.insert(activity);
    }

    info!(
        loaded = summary.loaded,
        failed = summary.failed,
        skipped = summary.skipped,
        "scan finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityType;

    fn gpx(name: &str, points: &[(f64, f64, &str)]) -> String {
        let points: String = points
            .iter()
            .map(|(lat, lon, time)| {
                format!("      <trkpt lat=\"{lat}\" lon=\"{lon}\"><time>{time}</time></trkpt>\n")
            })
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <gpx version=\"1.1\" creator=\"test\">\n  <trk>\n    <name>{name}</name>\n\
             \x20   <time>2023-05-01T07:00:00Z</time>\n    <trkseg>\n{points}    </trkseg>\n  </trk>\n</gpx>\n"
        )
    }

    fn write(dir: &Path, file: &str, content: &str) {
        fs::write(dir.join(file), content).unwrap();
    }

    fn populate(dir: &Path) {
        write(
            dir,
            "b_run.gpx",
            &gpx(
                "Running 2023-05-01",
                &[
                    (59.0, 18.0, "2023-05-01T07:00:00Z"),
                    (59.01, 18.0, "2023-05-01T07:06:00Z"),
                ],
            ),
        );
        write(
            dir,
            "a_walk.gpx",
            &gpx(
                "Walking 2023-05-02",
                &[
                    (59.0, 18.0, "2023-05-02T18:00:00Z"),
                    (59.0, 18.02, "2023-05-02T18:15:00Z"),
                ],
            ),
        );
        write(
            dir,
            "c_ride.gpx",
            &gpx(
                "Cycling 2023-05-03",
                &[
                    (59.0, 18.0, "2023-05-03T12:00:00Z"),
                    (59.1, 18.0, "2023-05-03T12:30:00Z"),
                ],
            ),
        );
        write(
            dir,
            "d_broken.gpx",
            "<gpx><trk><name>Running 1</name><time>x</time><trkseg>\
             <trkpt lon=\"18.0\"><time>2023-05-01T07:00:00Z</time></trkpt>\
             </trkseg></trk></gpx>",
        );
        write(dir, "notes.txt", "not a track");
        write(dir, "upper.GPX", "<gpx/>");
        fs::create_dir(dir.join("nested.gpx")).unwrap();
    }

    #[test]
    fn test_load_activity() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let activity = load_activity(&dir.path().join("b_run.gpx")).unwrap();
        assert_eq!(activity.activity_type, ActivityType::Running);
        assert_eq!(activity.total_duration_seconds, 360);
        assert_eq!(activity.segment_count, 1);
    }

    #[test]
    fn test_load_activity_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_activity(&dir.path().join("absent.gpx"));
        assert!(matches!(result, Err(Error::FileLoad(DocumentError::Io(_)))));
    }

    #[test]
    fn test_load_activity_invalid_xml() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.gpx", "<gpx><trk></gpx>");
        let result = load_activity(&dir.path().join("bad.gpx"));
        assert!(matches!(result, Err(Error::FileLoad(_))));
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let mut progress = Vec::<u8>::new();
        let summary = scan_directory(dir.path(), &ScanOptions::default(), &mut progress).unwrap();

        assert_eq!(summary.loaded, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 3);
        assert_eq!(progress, b"...");

        assert_eq!(summary.rankings.running.len(), 1);
        assert_eq!(summary.rankings.walking.len(), 1);
        assert_eq!(
            summary.rankings.walking.as_slice()[0].activity_type,
            ActivityType::Walking
        );
    }

    #[test]
    fn test_scan_directory_with_details() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let options = ScanOptions {
            details: true,
            ..Default::default()
        };
        let mut progress = Vec::<u8>::new();
        scan_directory(dir.path(), &options, &mut progress).unwrap();

        let text = String::from_utf8(progress).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("File: a_walk.gpx, type: Walking"));
        assert!(lines[1].starts_with("File: b_run.gpx, type: Running"));
        assert!(lines[2].starts_with("File: c_ride.gpx, type: Cycling"));
    }

    #[test]
    fn test_scan_directory_custom_extension() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let options = ScanOptions {
            extension: "GPX".to_string(),
            ..Default::default()
        };
        let mut progress = Vec::<u8>::new();
        let summary = scan_directory(dir.path(), &options, &mut progress).unwrap();

        // upper.GPX has no track and fails to load
        assert_eq!(summary.loaded, 0);
        assert_eq!(summary.failed, 1);
        assert!(summary.rankings.is_empty());
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let result = scan_directory(&missing, &ScanOptions::default(), &mut Vec::<u8>::new());
        assert!(matches!(result, Err(Error::ReadDir { path, .. }) if path == missing));
    }
}

use gpxrank::report::write_rankings;
use gpxrank::{Error, ScanOptions, scan_directory};
use std::io::{self, Write};
use std::path::Path;

pub fn rank_command(dir: &Path, options: &ScanOptions) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = scan_directory(dir, options, &mut out)?;

    writeln!(out)?;
    write_rankings(&mut out, &summary.rankings)?;
    Ok(())
}

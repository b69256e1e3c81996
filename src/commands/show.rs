use gpxrank::report::write_details;
use gpxrank::{Error, load_activity};
use std::io;
use std::path::Path;

pub fn show_command(file: &Path) -> Result<(), Error> {
    let activity = load_activity(file)?;

    let name = file.display().to_string();
    write_details(&mut io::stdout().lock(), &name, &activity)?;
    Ok(())
}

use crate::errors::{IoResultExt, Result};
use std::io::Write;
use std::path::Path;

/// Prefix of temporary files. `~` is outside the identifier alphabet, so a temp file left
/// behind by a crash is never mistaken for a ref.
pub const TEMP_PREFIX: &str = "~tmp-";

/// Replace `path` with `content`
///
/// The content is written to a temporary file in the same directory which is then renamed
/// over the target, so readers observe either the old or the new file.
pub fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).at_path(dir)?;

    let mut temp_file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(dir)
        .at_path(dir)?;
    temp_file.write_all(content).at_path(temp_file.path())?;
    temp_file.as_file().sync_all().at_path(temp_file.path())?;

    temp_file
        .persist(path)
        .map_err(|err| err.error)
        .at_path(path)?;

    Ok(())
}

use glob::Pattern;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error, warn};

/// File names directly inside `dir`, in the order the OS returns them.
/// Subdirectories and names matching any ignore glob are left out.
pub fn list_video_files(dir: &Path, ignore_globs: &[String]) -> io::Result<Vec<String>> {
    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let entries = fs::read_dir(dir).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Error reading directory {}: {}", dir.display(), err),
        )
    })?;

    let mut names = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("Error reading entry in directory {}: {}", dir.display(), err),
            )
        })?;

        let path = entry.path();
        if !path.is_file() {
            debug!("Skipping non-file entry {}", path.display());
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!(
                    "Skipping {}: file name is not valid UTF-8",
                    raw.to_string_lossy()
                );
                continue;
            }
        };
        if ignore_patterns.iter().any(|pattern| pattern.matches(&name)) {
            debug!("Ignoring {}", name);
            continue;
        }
        names.push(name);
    }

    Ok(names)
}

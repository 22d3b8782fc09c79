//! Resolve command-line inputs to benchmark files

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Expand literal paths and glob patterns into a list of files
///
/// Existing paths are taken as-is; anything else is treated as a glob
/// pattern whose matches are appended in sorted order. Patterns without
/// matches are logged and skipped, so the result may be empty.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let literal = Path::new(input);
        if literal.is_file() {
            files.push(literal.to_path_buf());
            continue;
        }

        let mut matches = glob::glob(input)
            .with_context(|| format!("Invalid file pattern: {}", input))?
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    warn!("Unreadable path while expanding {}: {}", input, e);
                    None
                }
            })
            .collect::<Vec<_>>();
        matches.sort();

        if matches.is_empty() {
            warn!("No files match {}", input);
        } else {
            debug!(pattern = %input, count = matches.len(), "expanded pattern");
        }
        files.extend(matches);
    }

    Ok(files)
}

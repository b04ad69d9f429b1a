use std::path::Path;

use eventwhisper_normalize::strip_wrapping_quotes;
use eventwhisper_types::EVTX_EXTENSION;
use walkdir::WalkDir;

/// List `.evtx` files under `directory`, optionally walking subdirectories.
///
/// The directory may be quoted or backticked. A path that is missing or not
/// a directory yields an empty list. Results are sorted.
pub fn list_evtx_files(directory: &str, recursive: bool) -> Vec<String> {
    let base = Path::new(strip_wrapping_quotes(directory));
    if !base.is_dir() {
        tracing::debug!(path = %base.display(), "not a directory");
        return Vec::new();
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut found: Vec<String> = WalkDir::new(base)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| has_evtx_extension(entry.path()) && entry.path().is_file())
        .map(|entry| entry.path().to_string_lossy().into_owned())
        .collect();
    found.sort();

    found
}

fn has_evtx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EVTX_EXTENSION))
}

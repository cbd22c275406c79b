use std::path::{Path, PathBuf};

/// How many directories, starting with the start directory itself, are
/// searched before giving up.
pub const MAX_DEPTH: usize = 10;

pub const MANIFEST_FILE: &str = "composer.json";

const CONTENT_DIR_CANDIDATES: [&str; 2] = ["wp-content", "app"];

/// First `start/name`, `start/../name`, ... that exists.
pub fn find_upward(start: &Path, name: &str, max_depth: usize) -> Option<PathBuf> {
    start
        .ancestors()
        .take(max_depth)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
}

pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    find_upward(start, MANIFEST_FILE, MAX_DEPTH).filter(|p| p.is_file())
}

/// Locate the WordPress content root.
///
/// `override_name` is tried before the stock names. For each name the
/// nearest match walking upward from `start` is taken, and it only counts if
/// it holds both `plugins/` and `themes/`.
pub fn find_content_root(start: &Path, override_name: Option<&str>) -> Option<PathBuf> {
    override_name
        .into_iter()
        .chain(CONTENT_DIR_CANDIDATES)
        .filter_map(|name| find_upward(start, name, MAX_DEPTH))
        .find(|dir| looks_like_content_root(dir))
}

fn looks_like_content_root(dir: &Path) -> bool {
    dir.join("plugins").is_dir() && dir.join("themes").is_dir()
}

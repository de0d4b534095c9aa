use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable consulted when no explicit graph path is given.
pub const GRAPH_PATH_ENV: &str = "ROUTEBENCH_GRAPH";

/// Default filename for the graph inside the platform data directory.
const GRAPH_FILENAME: &str = "graph.json";

/// Resolve the default graph location using platform-specific project directories.
pub fn default_graph_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "routebench", "routebench")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(GRAPH_FILENAME))
}

/// Locate the graph to load.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `ROUTEBENCH_GRAPH` environment variable.
/// 3. `graph.json` in the platform data directory.
///
/// The resolved path may be a JSON file or a CSV directory; either way it
/// must exist, otherwise [`Error::GraphSourceNotFound`] is returned.
pub fn resolve_graph_path(target: Option<&Path>) -> Result<PathBuf> {
    resolve_with_env(target, env::var_os(GRAPH_PATH_ENV))
}

fn resolve_with_env(target: Option<&Path>, env_value: Option<OsString>) -> Result<PathBuf> {
    let (path, source) = match (target, env_value) {
        (Some(explicit), _) => (explicit.to_path_buf(), "argument"),
        (None, Some(value)) if !value.is_empty() => (PathBuf::from(value), GRAPH_PATH_ENV),
        _ => (default_graph_path()?, "data dir"),
    };

    if !path.exists() {
        return Err(Error::GraphSourceNotFound { path });
    }
    debug!(path = %path.display(), source, "resolved graph path");
    Ok(path)
}

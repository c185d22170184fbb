//! Path helpers for the config directory and user-supplied file names.

use std::path::{Path, PathBuf};

/// Replace a leading `~/` with the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Resolve `name` against `base` unless it is absolute (after `~` expansion)
/// or `keep_relative` is set.
pub fn resolve_in(base: &Path, name: &str, keep_relative: bool) -> PathBuf {
    let p = expand_tilde(name);
    if p.is_absolute() || keep_relative {
        p
    } else {
        base.join(p)
    }
}

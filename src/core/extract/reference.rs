//! `#:` source references, relative to the directory of the output file.

use std::path::{Component, Path, PathBuf};

/// Make `path` absolute and fold `.` and `..` components lexically.
fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Path of `path` relative to `base`, joined with `/` on every platform.
pub fn relative_path(path: &Path, base: &Path) -> String {
    let path = normalize(path);
    let base = normalize(base);

    let path_parts: Vec<_> = path.components().collect();
    let base_parts: Vec<_> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    // No shared root (different drives): keep the absolute path.
    if common == 0 {
        return path.to_string_lossy().replace('\\', "/");
    }

    let ups = base_parts.len() - common;
    std::iter::repeat_n("..".to_string(), ups)
        .chain(
            path_parts[common..]
                .iter()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect::<Vec<_>>()
        .join("/")
}

/// A `file:line` reference.
pub fn format_reference(path: &Path, base: &Path, line: usize) -> String {
    format!("{}:{}", relative_path(path, base), line)
}

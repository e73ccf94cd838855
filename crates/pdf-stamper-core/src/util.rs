//! Utility functions shared across the crate.

use std::path::{Path, PathBuf};

/// Get the user's config directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// Resolve a bundled resource file.
///
/// Priority:
/// 1. Next to the running executable, or in its `assets/` directory (packaged form)
/// 2. `./assets` relative to the working directory
/// 3. The crate's built-in `assets/` directory (running from source)
///
/// If none exists the packaged location is returned, so that a failed open
/// names the place the file was expected.
pub fn resource_path(relative: impl AsRef<Path>) -> PathBuf {
    let relative = relative.as_ref();
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let mut candidates = Vec::with_capacity(4);
    if let Some(dir) = &exe_dir {
        candidates.push(dir.join(relative));
        candidates.push(dir.join("assets").join(relative));
    }
    candidates.push(PathBuf::from("assets").join(relative));
    candidates.push(source_assets_dir().join(relative));

    resolve_first_existing(&candidates).unwrap_or_else(|| {
        exe_dir.map_or_else(|| relative.to_path_buf(), |dir| dir.join(relative))
    })
}

/// Directory holding the crate's bundled assets in the source tree.
pub fn source_assets_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
}

fn resolve_first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    let found = candidates.iter().find(|p| p.is_file()).cloned();
    if let Some(path) = &found {
        tracing::debug!("Resolved resource {}", path.display());
    }
    found
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_font_resolves_from_source_layout() {
        for font in ["NanumBarunGothic.ttf", "DejaVuSans.ttf"] {
            let path = resource_path(font);
            assert!(path.is_file(), "expected bundled font at {}", path.display());
        }
    }

    #[test]
    fn test_missing_resource_falls_back_to_packaged_location() {
        let path = resource_path("definitely-not-bundled.ttf");
        assert!(!path.exists());
        assert!(path.ends_with("definitely-not-bundled.ttf"));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.ttf");
        let second = dir.path().join("b.ttf");
        std::fs::write(&second, b"x").unwrap();
        std::fs::write(&first, b"x").unwrap();

        let found = resolve_first_existing(&[dir.path().join("missing.ttf"), first.clone(), second]);
        assert_eq!(found, Some(first));
    }
}

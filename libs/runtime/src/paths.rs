use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the server home directory.
///
/// - `explicit`: value from configuration, `None`/empty means "use the platform default".
/// - `default_subdir`: directory name created under the platform home (e.g. ".staffdir").
/// - `create`: create the resolved directory (and parents) when missing.
///
/// The returned path is always absolute; a leading `~` is expanded against the
/// platform home.
pub fn resolve_home_dir(
    explicit: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let raw = match explicit {
        Some(p) => expand_tilde(&p)?,
        None => platform_home()?.join(default_subdir),
    };

    let resolved = if raw.is_absolute() {
        raw
    } else {
        std::env::current_dir()
            .context("Failed to read current directory")?
            .join(raw)
    };

    if create {
        std::fs::create_dir_all(&resolved)
            .with_context(|| format!("Failed to create home dir '{}'", resolved.display()))?;
    }

    Ok(resolved)
}

/// Platform base directory for per-user application state.
/// Windows: %APPDATA%; Unix/macOS: $HOME.
fn platform_home() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    std::env::var_os(var)
        .map(PathBuf::from)
        .with_context(|| format!("{var} is not set"))
}

fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return platform_home();
    }
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        return Ok(platform_home()?.join(rest));
    }
    Ok(Path::new(path).to_path_buf())
}

use std::path::{Path, PathBuf};

use quire::error::{Chainable, Result};
use quire::{error, Settings, Site};

use crate::flags::Quill;

/// Resolves the project root, loads its settings and applies the command
/// line overrides on top.
pub fn discover(flags: &Quill) -> Result<Site> {
    let root = flags.root.as_deref().unwrap_or(Path::new("."));
    let root = root.canonicalize().chain_with(|| error! {
        "project root does not exist",
        "path" => root.display(),
    })?;

    let mut settings = Settings::discover(&root, flags.config.as_deref())?;
    if let Some(output) = &flags.output {
        settings.output = relative_to(&root, &absolute(output)?);
    }

    log::debug!("building {} into {}", root.display(), settings.output.display());
    Ok(Site::new(root, settings))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().chain_with(|| error! {
        "failed to read the current directory",
    })?;

    Ok(cwd.join(path))
}

/// `path` relative to `root` when it lies inside it, so that the output
/// directory is left out of the static copy by name.
fn relative_to(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => path.to_path_buf(),
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_inside_root_is_relative() {
        let root = Path::new("/srv/site");
        assert_eq!(relative_to(root, Path::new("/srv/site/dist")), Path::new("dist"));
        assert_eq!(relative_to(root, Path::new("/tmp/out")), Path::new("/tmp/out"));
        assert_eq!(relative_to(root, root), root);
    }
}

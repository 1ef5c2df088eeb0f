use log::debug;
use std::path::{Path, PathBuf};

use super::state::ImageField;

/// Raster formats offered by the image picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// Open the native file dialog for an image field
pub fn pick_image(field: ImageField) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(field.dialog_title())
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_file()
}

/// Express `picked` relative to `base` when possible, otherwise keep it absolute
pub fn relative_to(picked: &Path, base: &Path) -> String {
    match pathdiff::diff_paths(picked, base) {
        Some(relative) if !relative.as_os_str().is_empty() => relative.to_string_lossy().into_owned(),
        _ => {
            debug!("No relative path from {} to {}", base.display(), picked.display());
            picked.to_string_lossy().into_owned()
        }
    }
}

/// Express `picked` relative to the working directory when possible
pub fn relative_to_working_dir(picked: &Path) -> String {
    match std::env::current_dir() {
        Ok(cwd) => relative_to(picked, &cwd),
        Err(_) => picked.to_string_lossy().into_owned(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn path_below_base_becomes_relative() {
        let base = Path::new("/srv/arcade");
        let picked = Path::new("/srv/arcade/covers/pm.png");
        assert_eq!(relative_to(picked, base), Path::new("covers/pm.png").to_string_lossy());
    }

    #[test]
    fn path_beside_base_climbs_up() {
        let base = Path::new("/srv/arcade");
        let picked = Path::new("/srv/art/pm.png");
        assert_eq!(relative_to(picked, base), Path::new("../art/pm.png").to_string_lossy());
    }

    #[test]
    fn relative_base_against_absolute_pick_stays_absolute() {
        let base = Path::new("arcade");
        let picked = Path::new("/srv/art/pm.png");
        assert_eq!(relative_to(picked, base), "/srv/art/pm.png");
    }
}

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::catalog::GameRecord;
use crate::launcher::view_state::{COVER_HEIGHT, COVER_WIDTH};

/// Size backgrounds are reduced to before blurring
const BACKGROUND_SIZE: (u32, u32) = (512, 384);

/// Gaussian blur applied to backgrounds
const BACKGROUND_BLUR_SIGMA: f32 = 6.0;

/// Colour of the generated placeholder cover
const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([100, 100, 200, 255]);

/// Result of decoding an image file
#[derive(Debug, Clone)]
pub enum ImageAsset {
    Loaded(RgbaImage),
    Placeholder,
}

/// Source of decoded images
pub trait AssetProvider {
    fn load_image(&self, path: &str) -> ImageAsset;
}

/// Reads images from disk, resolving relative paths against a base directory
#[derive(Debug, Clone)]
pub struct FsAssets {
    base_dir: PathBuf,
}

impl FsAssets {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    /// Resolve against the working directory
    pub fn from_working_dir() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl AssetProvider for FsAssets {
    fn load_image(&self, path: &str) -> ImageAsset {
        let resolved = self.resolve(path);
        match image::open(&resolved) {
            Ok(image) => ImageAsset::Loaded(image.to_rgba8()),
            Err(e) => {
                debug!("Image {} unavailable: {}", resolved.display(), e);
                ImageAsset::Placeholder
            }
        }
    }
}

/// Images decoded once at startup, ready to become textures
pub struct LauncherImages {
    /// One cover per record, in catalog order
    pub covers: Vec<RgbaImage>,
    /// Blurred backgrounds keyed by their path in the catalog
    pub backgrounds: HashMap<String, RgbaImage>,
}

impl LauncherImages {
    /// Decode covers and backgrounds for every record
    pub fn decode(records: &[GameRecord], assets: &impl AssetProvider, placeholder_cover: &str) -> Self {
        let placeholder = match assets.load_image(placeholder_cover) {
            ImageAsset::Loaded(image) => fit_cover(image),
            ImageAsset::Placeholder => {
                warn!("Placeholder cover {} unavailable, using a plain tile", placeholder_cover);
                plain_cover()
            }
        };

        let mut covers = Vec::with_capacity(records.len());
        let mut fallbacks = 0;
        for record in records {
            let cover = match record.cover_path().map(|path| assets.load_image(path)) {
                Some(ImageAsset::Loaded(image)) => fit_cover(image),
                _ => {
                    fallbacks += 1;
                    placeholder.clone()
                }
            };
            covers.push(cover);
        }

        let mut backgrounds = HashMap::new();
        for path in records.iter().filter_map(GameRecord::background_path) {
            if backgrounds.contains_key(path) {
                continue;
            }
            match assets.load_image(path) {
                ImageAsset::Loaded(image) => {
                    backgrounds.insert(path.to_string(), blur_background(image));
                }
                ImageAsset::Placeholder => warn!("Background {} unavailable", path),
            }
        }

        info!(
            "Decoded {} covers ({} placeholders) and {} backgrounds",
            covers.len(),
            fallbacks,
            backgrounds.len()
        );
        Self { covers, backgrounds }
    }
}

/// Scale an image to the carousel cover size
pub fn fit_cover(image: RgbaImage) -> RgbaImage {
    image::imageops::resize(&image, COVER_WIDTH as u32, COVER_HEIGHT as u32, FilterType::Triangle)
}

/// Solid tile used when even the placeholder file is missing
pub fn plain_cover() -> RgbaImage {
    RgbaImage::from_pixel(COVER_WIDTH as u32, COVER_HEIGHT as u32, PLACEHOLDER_COLOR)
}

/// Shrink and blur a background so it reads as a backdrop
pub fn blur_background(image: RgbaImage) -> RgbaImage {
    let (width, height) = BACKGROUND_SIZE;
    DynamicImage::ImageRgba8(image)
        .resize_to_fill(width, height, FilterType::Triangle)
        .blur(BACKGROUND_BLUR_SIGMA)
        .to_rgba8()
}


#[cfg(test)]
mod tests {
    use super::fake::MemoryAssets;
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];

    fn record(cover: &str, background: &str) -> GameRecord {
        GameRecord {
            name: "Game".into(),
            command: "game.sh".into(),
            cover_image: cover.into(),
            background_image: background.into(),
            ..Default::default()
        }
    }

    #[test]
    fn covers_are_scaled_and_missing_ones_use_placeholder() {
        let assets = MemoryAssets::default()
            .with("covers/placeholder.png", GREEN)
            .with("covers/pm.png", RED);
        let records = vec![record("covers/pm.png", ""), record("covers/missing.png", ""), record("", "")];

        let images = LauncherImages::decode(&records, &assets, "covers/placeholder.png");
        assert_eq!(images.covers.len(), 3);
        for cover in &images.covers {
            assert_eq!(cover.dimensions(), (COVER_WIDTH as u32, COVER_HEIGHT as u32));
        }
        assert_eq!(images.covers[0].get_pixel(0, 0), &Rgba(RED));
        assert_eq!(images.covers[1].get_pixel(0, 0), &Rgba(GREEN));
        assert_eq!(images.covers[2].get_pixel(0, 0), &Rgba(GREEN));
    }

    #[test]
    fn missing_placeholder_file_uses_plain_tile() {
        let assets = MemoryAssets::default();
        let images = LauncherImages::decode(&[record("covers/x.png", "")], &assets, "covers/placeholder.png");
        assert_eq!(images.covers[0], plain_cover());
    }

    #[test]
    fn shared_backgrounds_are_decoded_once() {
        let assets = MemoryAssets::default().with("bg/a.png", RED);
        let records = vec![record("", "bg/a.png"), record("", "bg/a.png"), record("", "bg/missing.png")];

        let images = LauncherImages::decode(&records, &assets, "p.png");
        assert_eq!(images.backgrounds.len(), 1);
        assert_eq!(images.backgrounds["bg/a.png"].dimensions(), BACKGROUND_SIZE);
        let requests = assets.requests.borrow();
        assert_eq!(requests.iter().filter(|p| *p == "bg/a.png").count(), 1);
    }

    #[test]
    fn filesystem_provider_falls_back_for_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("corrupt.png"), b"not an image").unwrap();
        let good = RgbaImage::from_pixel(4, 4, Rgba(RED));
        good.save(dir.path().join("good.png")).unwrap();
        let assets = FsAssets::new(dir.path());

        assert!(matches!(assets.load_image("absent.png"), ImageAsset::Placeholder));
        assert!(matches!(assets.load_image("corrupt.png"), ImageAsset::Placeholder));
        match assets.load_image("good.png") {
            ImageAsset::Loaded(image) => assert_eq!(image.dimensions(), (4, 4)),
            ImageAsset::Placeholder => panic!("expected decoded image"),
        }
    }
}

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use fermi_planet_core::TileKind;
use fermi_planet_rendering::{SourceRegion, TileClips};
use macroquad::{
    text::{self, Font},
    texture::{FilterMode, Texture2D},
};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;
const DEFAULT_FONT_SIZE: u16 = 28;

/// Asset locations and spritesheet layout resolved from a manifest file.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AssetManifest {
    /// Spritesheet holding every tile image.
    pub spritesheet: PathBuf,
    /// TrueType font used by the FPS overlay.
    pub font: PathBuf,
    /// Overlay font size in pixels.
    pub font_size: u16,
    /// Spritesheet region per tile kind.
    pub clips: TileClips,
}

impl AssetManifest {
    /// Reads and resolves the manifest located at `path`.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read asset manifest at {}", path.display()))?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        parse_manifest(&contents, &base)
    }

    /// Loads the spritesheet and font named by the manifest.
    pub(crate) fn load(&self) -> Result<Assets> {
        self.load_with(default_texture_loader, default_font_loader)
    }

    fn load_with(
        &self,
        mut load_texture: impl FnMut(&Path) -> Result<Texture2D>,
        mut load_font: impl FnMut(&Path) -> Result<Font>,
    ) -> Result<Assets> {
        let spritesheet = load_texture(&self.spritesheet).with_context(|| {
            format!("failed to load spritesheet {}", self.spritesheet.display())
        })?;
        let font = load_font(&self.font)
            .with_context(|| format!("failed to load font {}", self.font.display()))?;

        tracing::info!(
            spritesheet = %self.spritesheet.display(),
            font = %self.font.display(),
            "assets loaded"
        );

        Ok(Assets {
            spritesheet,
            font,
            font_size: self.font_size,
            clips: self.clips,
        })
    }
}

/// GPU-resident assets used while drawing.
pub(crate) struct Assets {
    pub spritesheet: Texture2D,
    pub font: Font,
    pub font_size: u16,
    pub clips: TileClips,
}

/// Decoded RGBA8 pixels ready for upload.
#[derive(Debug)]
struct DecodedImage {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
}

fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    let rgba = image::load_from_memory(bytes)
        .context("failed to decode image data")?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width: u16::try_from(width).context("image wider than 65535 pixels")?,
        height: u16::try_from(height).context("image taller than 65535 pixels")?,
        pixels: rgba.into_raw(),
    })
}

fn default_texture_loader(path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read image at {}", path.display()))?;
    let decoded = decode_image(&bytes)?;
    let texture = Texture2D::from_rgba8(decoded.width, decoded.height, &decoded.pixels);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

fn default_font_loader(path: &Path) -> Result<Font> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read font at {}", path.display()))?;
    text::load_ttf_font_from_bytes(&bytes).map_err(|error| anyhow!("invalid font data: {error:?}"))
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    spritesheet: String,
    font: String,
    font_size: Option<u16>,
    #[serde(default)]
    clips: HashMap<TileKind, SourceRegion>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<AssetManifest> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse asset manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported asset manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let font_size = manifest.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    if font_size == 0 {
        bail!("asset manifest font_size must be positive");
    }

    let clips = manifest
        .clips
        .into_iter()
        .fold(TileClips::default(), |clips, (kind, region)| {
            clips.with_region(kind, region)
        });

    Ok(AssetManifest {
        spritesheet: base_path.join(manifest.spritesheet),
        font: base_path.join(manifest.font),
        font_size,
        clips,
    })
}

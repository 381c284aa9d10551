//! Tab icon thumbnails

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::Result;

/// RGBA raster thumbnail shown in the tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabIcon {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl TabIcon {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| {
                TabError::InvalidIcon(format!("{}x{} icon is too large", width, height))
            })?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(TabError::InvalidIcon(format!(
                "{}x{} icon needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 1x1 transparent pixel used until a page supplies a favicon
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0, 0],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    /// Encode as PNG for the `icon` BLOB column
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let image = RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| TabError::InvalidIcon("pixel buffer does not match size".into()))?;

        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    pub fn from_png(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8();
        let (width, height) = image.dimensions();

        Ok(Self {
            width,
            height,
            pixels: image.into_raw(),
        })
    }
}

impl Default for TabIcon {
    fn default() -> Self {
        Self::placeholder()
    }
}

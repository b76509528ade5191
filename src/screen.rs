use bytemuck::try_cast_slice_mut;
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::Tile;

/// RGBA8 pixel buffer covering `rect` of the final image.
pub struct ScreenSpace {
    pub rect: Tile,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ScreenSpace {
    pub fn new(width: u32, height: u32) -> Self {
        Self::for_tile(Tile { min_x: 0, min_y: 0, max_x: width, max_y: height })
    }
    pub fn for_tile(rect: Tile) -> Self {
        let (width, height) = (rect.width(), rect.height());
        Self {
            rect,
            width,
            height,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }
    pub fn set_pixel(&mut self, x: u32, y: u32, red: u8, green: u8, blue: u8, alpha: u8) {
        if x >= self.width || y >= self.height { return; }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba[i] = red;
        self.rgba[i + 1] = green;
        self.rgba[i + 2] = blue;
        self.rgba[i + 3] = alpha;
    }
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if x >= self.width || y >= self.height { return None }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some((self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]))
    }
    pub fn clear(&mut self, r: u8, g: u8, b: u8, a: u8) {
        let color: u32 = u32::from_le_bytes([r, g, b, a]);
        if let Ok(buf_as_u32) = try_cast_slice_mut::<u8, u32>(&mut self.rgba) {
            buf_as_u32.fill(color);
            return;
        }
        // Unaligned (or empty) buffer, fill byte-wise
        for px in self.rgba.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, a]);
        }
    }
    /// Copies a tile buffer into this one at the tile's position.
    pub fn blit(&mut self, tile: &ScreenSpace) {
        let tile_width = tile.rect.width();
        for y in 0..tile.rect.height() {
            let screen_y = tile.rect.min_y + y;
            if screen_y >= self.height || tile.rect.min_x >= self.width {
                continue;
            }
            let screen_row_start = (screen_y as usize * self.width as usize + tile.rect.min_x as usize) * 4;
            let tile_row_start = y as usize * tile_width as usize * 4;
            // Clamp the row to the screen width
            let row_len = tile_width.min(self.width - tile.rect.min_x) as usize * 4;
            self.rgba[screen_row_start..screen_row_start + row_len]
                .copy_from_slice(&tile.rgba[tile_row_start..tile_row_start + row_len]);
        }
    }
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| Error::invalid_input("pixel buffer does not match image size"))?;
        img.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

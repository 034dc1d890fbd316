//! Pixel buffer abstraction and the in-memory bitmap.

use image::{Rgba, RgbaImage};

use super::Color;

/// A mutable grid of RGBA pixels.
///
/// Coordinates outside the buffer are the caller's responsibility; the
/// assembler only addresses pixels inside the layout it validated.
pub trait PixelBuffer {
	/// Width in pixels.
	fn width(&self) -> u32;

	/// Height in pixels.
	fn height(&self) -> u32;

	/// Reads one pixel.
	fn get_pixel(&self, x: u32, y: u32) -> Color;

	/// Writes one pixel.
	fn set_pixel(&mut self, x: u32, y: u32, color: Color);

	/// Returns true if the pixel's alpha is zero.
	fn is_transparent(&self, x: u32, y: u32) -> bool {
		self.get_pixel(x, y).is_transparent()
	}

	/// Copies a `width × height` block from `src` at `(src_x, src_y)` to
	/// `(dst_x, dst_y)` in this buffer.
	#[allow(clippy::too_many_arguments)]
	fn copy_from<B: PixelBuffer + ?Sized>(
		&mut self,
		src: &B,
		src_x: u32,
		src_y: u32,
		width: u32,
		height: u32,
		dst_x: u32,
		dst_y: u32,
	) {
		for y in 0..height {
			for x in 0..width {
				self.set_pixel(dst_x + x, dst_y + y, src.get_pixel(src_x + x, src_y + y));
			}
		}
	}
}

/// Owned RGBA bitmap, initialized to transparent black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
	width: u32,
	height: u32,
	pixels: Vec<Color>,
}

impl Bitmap {
	/// Creates a transparent bitmap.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			pixels: vec![Color::transparent(); width as usize * height as usize],
		}
	}

	/// Creates a bitmap from raw RGBA bytes. Returns `None` if the length does
	/// not match the dimensions.
	pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
		if rgba.len() != width as usize * height as usize * 4 {
			return None;
		}
		let pixels = rgba
			.chunks_exact(4)
			.map(|chunk| Color::new(chunk[0], chunk[1], chunk[2], chunk[3]))
			.collect();
		Some(Self {
			width,
			height,
			pixels,
		})
	}

	/// Returns the pixels in row-major order.
	pub fn pixels(&self) -> &[Color] {
		&self.pixels
	}

	/// Returns the raw RGBA bytes in row-major order.
	pub fn to_rgba(&self) -> Vec<u8> {
		self.pixels.iter().flat_map(|color| color.to_array()).collect()
	}

	/// Resets every pixel to transparent.
	pub fn clear(&mut self) {
		self.pixels.fill(Color::transparent());
	}

	/// Converts the bitmap into an `image` buffer.
	pub fn to_image(&self) -> RgbaImage {
		RgbaImage::from_fn(self.width, self.height, |x, y| Rgba(self.get_pixel(x, y).to_array()))
	}

	#[inline]
	fn offset(&self, x: u32, y: u32) -> usize {
		y as usize * self.width as usize + x as usize
	}
}

impl PixelBuffer for Bitmap {
	fn width(&self) -> u32 {
		self.width
	}

	fn height(&self) -> u32 {
		self.height
	}

	fn get_pixel(&self, x: u32, y: u32) -> Color {
		self.pixels[self.offset(x, y)]
	}

	fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
		let offset = self.offset(x, y);
		self.pixels[offset] = color;
	}
}

impl From<&RgbaImage> for Bitmap {
	fn from(image: &RgbaImage) -> Self {
		Self {
			width: image.width(),
			height: image.height(),
			pixels: image.pixels().map(|pixel| Color::from_array(pixel.0)).collect(),
		}
	}
}

impl PixelBuffer for RgbaImage {
	fn width(&self) -> u32 {
		self.dimensions().0
	}

	fn height(&self) -> u32 {
		self.dimensions().1
	}

	fn get_pixel(&self, x: u32, y: u32) -> Color {
		Color::from_array(image::GenericImageView::get_pixel(self, x, y).0)
	}

	fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
		self.put_pixel(x, y, Rgba(color.to_array()));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bitmap_starts_transparent() {
		let bitmap = Bitmap::new(3, 2);
		assert_eq!(bitmap.pixels().len(), 6);
		assert!(bitmap.is_transparent(2, 1));
	}

	#[test]
	fn test_rgba_roundtrip() {
		let rgba: Vec<u8> = (0..16).collect();
		let bitmap = Bitmap::from_rgba(2, 2, &rgba).unwrap();
		assert_eq!(bitmap.get_pixel(1, 1), Color::new(12, 13, 14, 15));
		assert_eq!(bitmap.to_rgba(), rgba);
		assert!(Bitmap::from_rgba(2, 2, &rgba[..15]).is_none());
	}

	#[test]
	fn test_image_buffer_impl() {
		let mut bitmap = Bitmap::new(2, 2);
		bitmap.set_pixel(1, 0, Color::rgb(9, 8, 7));

		let mut image = bitmap.to_image();
		assert_eq!(PixelBuffer::get_pixel(&image, 1, 0), Color::rgb(9, 8, 7));

		PixelBuffer::set_pixel(&mut image, 0, 1, Color::gray(3));
		let back = Bitmap::from(&image);
		assert_eq!(back.get_pixel(0, 1), Color::gray(3));
		assert_eq!(back.get_pixel(1, 0), Color::rgb(9, 8, 7));
	}

	#[test]
	fn test_copy_from() {
		let mut src = Bitmap::new(4, 4);
		src.set_pixel(2, 3, Color::rgb(1, 1, 1));
		let mut dst = Bitmap::new(2, 2);
		dst.copy_from(&src, 2, 2, 2, 2, 0, 0);
		assert_eq!(dst.get_pixel(0, 1), Color::rgb(1, 1, 1));
	}
}

//! RGBA colors and the compact outfit color encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of hue steps in the outfit color table
pub const HSI_HUE_STEPS: u8 = 19;

/// Number of saturation/intensity rows in the outfit color table
pub const HSI_ROWS: u8 = 7;

/// Number of encodable outfit colors (`0..=132`)
pub const HSI_COLOR_COUNT: u8 = HSI_HUE_STEPS * HSI_ROWS;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a new grayscale color.
	pub const fn gray(value: u8) -> Self {
		Self::rgb(value, value, value)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Returns true if the alpha channel is zero.
	#[inline]
	pub const fn is_transparent(&self) -> bool {
		self.a == 0
	}

	/// Returns the components as `[r, g, b, a]`.
	pub const fn to_array(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}

	/// Creates a color from `[r, g, b, a]`.
	pub const fn from_array(rgba: [u8; 4]) -> Self {
		Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
	}

	/// Multiplies each color channel by the matching channel of `tint` divided
	/// by 255, keeping this color's alpha.
	pub fn multiply(self, tint: Color) -> Self {
		let scale = |channel: u8, factor: u8| (u32::from(channel) * u32::from(factor) / 255) as u8;
		Self::new(scale(self.r, tint.r), scale(self.g, tint.g), scale(self.b, tint.b), self.a)
	}

	/// Composites `self` over `dst` (straight alpha, source-over).
	pub fn over(self, dst: Color) -> Self {
		match self.a {
			0 => dst,
			255 => self,
			src_a => {
				let src_a = u32::from(src_a);
				let dst_a = u32::from(dst.a) * (255 - src_a) / 255;
				let out_a = src_a + dst_a;
				let blend = |s: u8, d: u8| {
					((u32::from(s) * src_a + u32::from(d) * dst_a) / out_a.max(1)) as u8
				};
				Self::new(blend(self.r, dst.r), blend(self.g, dst.g), blend(self.b, dst.b), out_a as u8)
			}
		}
	}

	/// Decodes a compact outfit color byte.
	///
	/// The byte indexes a table of 19 hues by 7 saturation/intensity rows.
	/// Column 0 of every row is a gray ramp from white to black. Values past
	/// the table (133 and up) decode as color 0. The result is opaque.
	///
	/// # Examples
	///
	/// ```
	/// use obd_types::sheet::Color;
	///
	/// assert_eq!(Color::from_hsi(0), Color::rgb(255, 255, 255));
	/// assert_eq!(Color::from_hsi(200), Color::from_hsi(0));
	/// ```
	pub fn from_hsi(color: u8) -> Self {
		let color = if color >= HSI_COLOR_COUNT {
			0
		} else {
			color
		};

		let steps = f64::from(HSI_HUE_STEPS);
		let (hue, saturation, intensity) = if color % HSI_HUE_STEPS == 0 {
			(0.0, 0.0, 1.0 - f64::from(color) / steps / f64::from(HSI_ROWS))
		} else {
			let hue = f64::from(color % HSI_HUE_STEPS) * (1.0 / 18.0);
			let (saturation, intensity) = match color / HSI_HUE_STEPS {
				0 => (0.25, 1.00),
				1 => (0.25, 0.75),
				2 => (0.50, 0.75),
				3 => (0.667, 0.75),
				4 => (1.00, 1.00),
				5 => (1.00, 0.75),
				_ => (1.00, 0.50),
			};
			(hue, saturation, intensity)
		};

		if intensity == 0.0 {
			return Self::rgb(0, 0, 0);
		}

		let channel = |value: f64| (value * 255.0) as u8;
		if saturation == 0.0 {
			let value = channel(intensity);
			return Self::rgb(value, value, value);
		}

		let (red, green, blue);
		if hue < 1.0 / 6.0 {
			red = intensity;
			blue = intensity * (1.0 - saturation);
			green = blue + (intensity - blue) * 6.0 * hue;
		} else if hue < 2.0 / 6.0 {
			green = intensity;
			blue = intensity * (1.0 - saturation);
			red = green - (intensity - blue) * (6.0 * hue - 1.0);
		} else if hue < 3.0 / 6.0 {
			green = intensity;
			red = intensity * (1.0 - saturation);
			blue = red + (intensity - red) * (6.0 * hue - 2.0);
		} else if hue < 4.0 / 6.0 {
			blue = intensity;
			red = intensity * (1.0 - saturation);
			green = blue - (intensity - red) * (6.0 * hue - 3.0);
		} else if hue < 5.0 / 6.0 {
			blue = intensity;
			green = intensity * (1.0 - saturation);
			red = green + (intensity - green) * (6.0 * hue - 4.0);
		} else {
			red = intensity;
			green = intensity * (1.0 - saturation);
			blue = red - (intensity - green) * (6.0 * hue - 5.0);
		}

		Self::rgb(channel(red), channel(green), channel(blue))
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hsi_gray_ramp() {
		assert_eq!(Color::from_hsi(0), Color::gray(255));
		// Row 6, column 0: intensity 1 - 114/133
		assert_eq!(Color::from_hsi(114), Color::gray(36));
	}

	#[test]
	fn test_hsi_pure_hues() {
		// Row 4 is full saturation and intensity; hue 1/18 lies in the red sextant
		let color = Color::from_hsi(4 * 19 + 1);
		assert_eq!(color.r, 255);
		assert_eq!(color.b, 0);
		assert!(color.g > 0 && color.g < 255);

		// Hue 7/18 lies in the green-to-cyan sextant
		let color = Color::from_hsi(4 * 19 + 7);
		assert_eq!((color.r, color.g), (0, 255));
		assert!((84..=85).contains(&color.b));
	}

	#[test]
	fn test_hsi_out_of_range_is_color_zero() {
		assert_eq!(Color::from_hsi(133), Color::from_hsi(0));
		assert_eq!(Color::from_hsi(255), Color::from_hsi(0));
	}

	#[test]
	fn test_multiply_keeps_alpha() {
		let gray = Color::new(200, 100, 50, 77);
		assert_eq!(gray.multiply(Color::rgb(255, 0, 128)), Color::new(200, 0, 25, 77));
	}

	#[test]
	fn test_over() {
		let dst = Color::rgb(10, 20, 30);
		assert_eq!(Color::transparent().over(dst), dst);
		assert_eq!(Color::rgb(1, 2, 3).over(dst), Color::rgb(1, 2, 3));
		let half = Color::new(255, 0, 0, 128).over(Color::transparent());
		assert_eq!(half, Color::new(255, 0, 0, 128));
	}
}

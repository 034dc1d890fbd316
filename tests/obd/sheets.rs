use anyhow::Result;
use obd_rs::obd_types::sheet::outfit_extents;
use obd_rs::prelude::*;

use crate::{patterned, solid};

#[test_log::test]
fn test_sheet_png_roundtrip() -> Result<()> {
	let mut group = FrameGroup::new(2, 2, 1, 2, 1, 1, 2);
	group.durations = vec![FrameDuration::fixed(200); 2];
	let sprites: Vec<_> = (0..group.sprite_count())
		.map(|i| patterned(i as u32 + 1, (i * 7) as u8))
		.collect();
	group.sprite_ids = sprites.iter().map(|sprite| sprite.id).collect();

	let sheet = assemble(&group, &sprites)?;
	let layout = group.extents().layout();
	assert_eq!((sheet.width(), sheet.height()), (layout.width(), layout.height()));

	let path = std::env::temp_dir().join(format!("obd-rs-sheet-{}.png", std::process::id()));
	sheet.to_image().save(&path)?;
	let image = image::open(&path).map(|image| image.to_rgba8());
	std::fs::remove_file(&path)?;
	let image = image?;

	assert_eq!(split(&group, &image)?, sprites);
	Ok(())
}

#[test]
fn test_split_rejects_wrong_size() {
	let group = FrameGroup::new(1, 1, 1, 1, 1, 1, 1);
	let result = split(&group, &Bitmap::new(31, 32));
	assert!(matches!(result, Err(ValidationError::BitmapSize { actual_width: 31, .. })));
}

#[test_log::test]
fn test_outfit_recolor_with_addon() -> Result<()> {
	// Layer 0 holds the template, layer 1 the blend mask; pattern-y row 1 is an addon
	let group = FrameGroup::new(1, 1, 2, 1, 2, 1, 1);
	let sprites = [
		solid(1, Color::gray(200)),
		solid(2, Color::rgb(255, 0, 0)),
		solid(1, Color::gray(200)),
		solid(3, Color::rgb(0, 0, 255)),
	];
	let sheet = assemble(&group, &sprites)?;
	let palette = OutfitPalette::new(
		Color::rgb(255, 255, 255),
		Color::rgb(255, 128, 0),
		Color::rgb(255, 255, 255),
		Color::rgb(0, 0, 255),
	);

	let base = colorize_outfit(&group, &sheet, &palette, 0)?;
	let layout = outfit_extents(&group).layout();
	assert_eq!((base.width(), base.height()), (layout.width(), layout.height()));
	assert_eq!(base.get_pixel(5, 5), Color::rgb(200, 100, 0));

	let dressed = colorize_outfit(&group, &sheet, &palette, 0b1)?;
	assert_eq!(dressed.get_pixel(5, 5), Color::rgb(0, 0, 200));

	let single_layer = FrameGroup::new(1, 1, 1, 1, 1, 1, 1);
	let flat = assemble(&single_layer, &[solid(1, Color::gray(10))])?;
	assert!(matches!(
		colorize_outfit(&single_layer, &flat, &palette, 0),
		Err(ValidationError::NotEnoughLayers(1))
	));
	Ok(())
}

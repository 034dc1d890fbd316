use anyhow::Result;
use log::info;
use obd_rs::prelude::*;

use crate::patterned;

fn walking_outfit() -> Result<ObjectDefinition> {
	let mut walking = FrameGroup::new(1, 1, 1, 4, 1, 1, 2);
	walking.durations = vec![FrameDuration::new(100, 200)?, FrameDuration::fixed(150)];
	walking.loop_count = -1;
	let sprites = (0..walking.sprite_count())
		.map(|i| patterned(i as u32 % 3 + 1, (i % 3) as u8))
		.collect();

	let mut outfit = ObjectDefinition::new(128, ObjectCategory::Outfit)
		.with_group(FrameGroupType::Default, FrameGroup::new(1, 1, 1, 1, 1, 1, 1))
		.with_group(FrameGroupType::Walking, walking);
	outfit.attach_sprites(FrameGroupType::Default, vec![SpriteData::blank(0)])?;
	outfit.attach_sprites(FrameGroupType::Walking, sprites)?;
	outfit.properties.push(RawProperty {
		tag: 0x40,
		data: vec![0xFD, 0xFE, 0xFF],
	});
	Ok(outfit)
}

#[test_log::test]
fn test_outfit_roundtrip_through_disk() -> Result<()> {
	let mut file = ObdFile::new(FormatVersion::V3);
	file.objects.push(walking_outfit()?);

	let bytes = file.to_bytes()?;
	assert_eq!(hex::encode(&bytes[..6]), "4f424400fe03");
	info!("encoded {} objects into {} bytes", file.len(), bytes.len());

	let path = std::env::temp_dir().join(format!("obd-rs-roundtrip-{}.obd", std::process::id()));
	file.save(&path)?;
	let loaded = ObdFile::open(&path);
	std::fs::remove_file(&path)?;
	let loaded = loaded?;

	assert_eq!(loaded, file);
	let outfit = loaded.get(ObjectCategory::Outfit, 128).unwrap();
	assert_eq!(outfit.sprite_group(FrameGroupType::Walking)?[4], patterned(2, 1));
	assert!(outfit.sprite_group(FrameGroupType::Default)?[0].is_blank());
	Ok(())
}

#[test_log::test]
fn test_hand_written_container() -> Result<()> {
	// Item 0x1FE with one tile whose sprite ID is 0xFE, so both need escaping
	let bytes = hex::decode(concat!(
		"4f424400",
		"fe01",
		"fe01",
		"100400", "fdfe010000",
		"fe00",
		"200400", "01012000",
		"210100", "01",
		"220300", "010101",
		"230100", "01",
		"250400", "fdfe000000",
		"ff",
		"ff",
		"ff",
	))?;

	let file = ObdFile::from_bytes(&bytes)?;
	assert_eq!(file.version, FormatVersion::V1);
	assert_eq!(file.len(), 1);

	let item = file.get(ObjectCategory::Item, 0x1FE).unwrap();
	let group = item.frame_group(FrameGroupType::Default).unwrap();
	assert_eq!(group.sprite_ids, [0xFE]);
	assert_eq!(group.exact_size, 32);
	assert!(!group.is_animated());

	assert_eq!(file.to_bytes()?, bytes);
	Ok(())
}

#[test_log::test]
fn test_node_tree_escaping() -> Result<()> {
	let node = Node::decode(&hex::decode("fe01fdfefdfffdfdfe02ffff")?)?;
	assert_eq!(node.node_type, 0x01);
	assert_eq!(node.payload, [0xFE, 0xFF, 0xFD]);
	assert_eq!(node.children, [Node::new(0x02)]);

	assert_eq!(hex::encode(node.encode()?), "fe01fdfefdfffdfdfe02ffff");
	Ok(())
}

#[test_log::test]
fn test_reader_recovers_from_bad_objects() -> Result<()> {
	let mut file = ObdFile::new(FormatVersion::V2);
	for id in 1..=3 {
		let mut object = ObjectDefinition::new(id, ObjectCategory::Effect)
			.with_group(FrameGroupType::Default, FrameGroup::new(1, 1, 1, 1, 1, 1, 1));
		object.properties.push(RawProperty {
			tag: 0x40 + id as u8,
			data: vec![id as u8],
		});
		file.objects.push(object);
	}
	let bytes = file.to_bytes()?;

	let reader = ObjectReader::with_config(std::io::Cursor::new(bytes.as_slice()), ReadConfig::strict(), &Passthrough)?;
	let results: Vec<_> = reader.collect();
	assert_eq!(results.len(), 3);
	assert!(results.iter().all(|result| matches!(
		result,
		Err(ObdError::Validation(ValidationError::UnknownProperty { context: "object", .. }))
	)));

	let lenient = ObdFile::from_bytes_with(&bytes, ReadConfig::lenient(), &Passthrough)?;
	assert_eq!(lenient, file);
	Ok(())
}

#[test]
fn test_container_json_export() -> Result<()> {
	let mut file = ObdFile::new(FormatVersion::V2);
	let mut group = FrameGroup::new(2, 1, 1, 1, 1, 1, 2);
	group.durations = vec![FrameDuration::fixed(300); 2];
	group.start_frame = StartFrame::Fixed(1);
	file.objects.push(ObjectDefinition::new(7, ObjectCategory::Missile).with_group(FrameGroupType::Default, group));

	let json = serde_json::to_string(&file)?;
	let restored: ObdFile = serde_json::from_str(&json)?;
	assert_eq!(restored, file);

	let value: serde_json::Value = serde_json::from_str(&json)?;
	assert_eq!(value["version"], "V2");
	assert_eq!(value["objects"][0]["category"], "Missile");
	Ok(())
}

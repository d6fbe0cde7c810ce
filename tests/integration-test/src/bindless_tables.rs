#![cfg(test)]

use crate::{device, sampled_texture, storage_buffer, table_layout, texture_table};
use gpu_rhi_core::descriptor::{
	BindingLayoutEntry, BindingResource, BindingSetCreateInfo, BindingSetLayoutCreateInfo, BindingType,
	BindlessTableCreateInfo, ResourceKind, SamplerCreateInfo, ShaderStages, TableCapacity, TableError,
	TextureCreateInfo, TextureUsage,
};
use gpu_rhi_core::platform::headless::HeadlessCall;

#[test]
fn test_bind_propagates_to_binding_set() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let table = texture_table(&mut device, TableCapacity::Fixed(4))?;
	let x = sampled_texture(&mut device, "x")?;
	let y = sampled_texture(&mut device, "y")?;
	device.bind_texture(table, x, 0)?;

	let buffer = storage_buffer(&mut device, "buffer")?;
	let layout = table_layout(&mut device, 4, ShaderStages::FRAGMENT)?;
	let set = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
		name: "set",
	})?;
	let x_id = device.implementation(x).id;
	let y_id = device.implementation(y).id;
	assert_eq!(device.resolve_table_slot(set, 1, 0), Some(x.erase()));
	assert_eq!(device.implementation(set).array_element(1, 0), Some(x_id));

	device.platform().take_calls();
	assert_eq!(device.bind_texture(table, y, 0)?, Some(x));
	assert_eq!(device.resolve_table_slot(set, 1, 0), Some(y.erase()));
	assert_eq!(device.implementation(set).array_element(1, 0), Some(y_id));
	assert_eq!(
		device.platform().take_calls(),
		vec![HeadlessCall::WriteSlot {
			set: device.implementation(set).id,
			binding: 1,
			index: 0,
			resource: Some(y_id),
		}]
	);

	// x is no longer referenced and may be destroyed
	device.destroy_texture(x);
	device.unbind_texture(table, 0)?;
	assert_eq!(device.resolve_table_slot(set, 1, 0), None);
	assert_eq!(device.implementation(set).array_element(1, 0), None);
	Ok(())
}

#[test]
fn test_out_of_range() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let table = texture_table(&mut device, TableCapacity::Fixed(4))?;
	let texture = sampled_texture(&mut device, "texture")?;
	device.bind_texture(table, texture, 3)?;

	let result = device.bind_texture(table, texture, 4);
	assert!(matches!(
		result,
		Err(TableError::OutOfRange {
			index: 4,
			capacity: 4,
			..
		})
	));
	assert!(matches!(
		device.unbind_texture(table, 100),
		Err(TableError::OutOfRange { .. })
	));
	for index in 0..3 {
		assert_eq!(device.texture_table_slot(table, index), None);
	}
	assert_eq!(device.texture_table_slot(table, 3), Some(texture));
	assert_eq!(device.entry(texture).users, 1);
	Ok(())
}

#[test]
fn test_bind_storage_only_texture() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let table = texture_table(&mut device, TableCapacity::Fixed(4))?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE)?;
	let set = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
		name: "set",
	})?;
	let storage = device.create_texture(&TextureCreateInfo {
		usage: TextureUsage::STORAGE,
		name: "storage only",
		..TextureCreateInfo::default()
	})?;
	device.platform().take_calls();

	match device.bind_texture(table, storage, 0) {
		Err(TableError::MissingUsage {
			kind,
			element_kind,
			element,
			..
		}) => {
			assert_eq!(kind, ResourceKind::TextureTable);
			assert_eq!(element_kind, ResourceKind::Texture);
			assert_eq!(element, "storage only");
		}
		other => panic!("expected MissingUsage, got {other:?}"),
	}
	assert_eq!(device.texture_table_slot(table, 0), None);
	assert_eq!(device.resolve_table_slot(set, 1, 0), None);
	assert_eq!(device.implementation(set).array_element(1, 0), None);
	assert_eq!(device.entry(storage).users, 0);
	assert!(device.platform().calls().is_empty());

	// a texture only lacking usage may be destroyed right away
	device.destroy_texture(storage);
	Ok(())
}

#[test]
fn test_table_in_use() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let table = texture_table(&mut device, TableCapacity::Fixed(4))?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE)?;
	let set = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
		name: "set",
	})?;

	assert!(matches!(
		device.destroy_texture_table(table),
		Err(TableError::TableInUse { dependents: 1, .. })
	));
	assert!(device.is_alive(table));

	device.destroy_binding_set(set);
	device.destroy_texture_table(table)?;
	assert!(!device.is_alive(table));
	device.destroy_binding_set_layout(layout);
	device.destroy_buffer(buffer);
	assert!(device.shutdown().is_empty());
	Ok(())
}

#[test]
fn test_growable_table() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let table = texture_table(&mut device, TableCapacity::Growable { initial: 2, max: 64 })?;
	assert_eq!(device.texture_table_capacity(table), 2);

	let texture = sampled_texture(&mut device, "texture")?;
	device.bind_texture(table, texture, 40)?;
	assert_eq!(device.texture_table_capacity(table), 41);
	assert_eq!(device.texture_table_slot(table, 40), Some(texture));

	// clearing slots never grows the table
	assert_eq!(device.unbind_texture(table, 50)?, None);
	assert_eq!(device.texture_table_capacity(table), 41);
	assert_eq!(device.unbind_texture(table, 40)?, Some(texture));
	assert_eq!(device.texture_table_capacity(table), 41);
	device.bind_texture(table, texture, 40)?;
	assert!(matches!(
		device.bind_texture(table, texture, 64),
		Err(TableError::OutOfRange { capacity: 64, .. })
	));

	// a set created later still observes the earlier bind
	let buffer = storage_buffer(&mut device, "buffer")?;
	let layout = table_layout(&mut device, 64, ShaderStages::ALL_GRAPHICS)?;
	let set = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
		name: "set",
	})?;
	let id = device.implementation(texture).id;
	assert_eq!(device.implementation(set).array_element(1, 40), Some(id));
	Ok(())
}

#[test]
fn test_table_exceeds_layout() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let table = texture_table(&mut device, TableCapacity::Growable { initial: 2, max: 64 })?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	let layout = table_layout(&mut device, 32, ShaderStages::COMPUTE)?;
	let result = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
		name: "set",
	});
	assert!(result.is_err());
	device.destroy_texture_table(table)?;
	Ok(())
}

#[test]
#[should_panic(expected = "while it is still in use by 1 other resources")]
fn test_destroy_bound_texture() {
	let mut device = device(true).unwrap();
	let table = texture_table(&mut device, TableCapacity::Fixed(4)).unwrap();
	let texture = sampled_texture(&mut device, "texture").unwrap();
	device.bind_texture(table, texture, 2).unwrap();
	device.destroy_texture(texture);
}

#[test]
#[should_panic(expected = "was already destroyed or belongs to another device")]
fn test_bind_dead_texture() {
	let mut device = device(true).unwrap();
	let table = texture_table(&mut device, TableCapacity::Fixed(4)).unwrap();
	let texture = sampled_texture(&mut device, "texture").unwrap();
	device.destroy_texture(texture);
	let _ = device.bind_texture(table, texture, 0);
}

#[test]
fn test_sampler_table() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let table = device.create_sampler_table(&BindlessTableCreateInfo {
		capacity: TableCapacity::Fixed(8),
		name: "samplers",
	})?;
	let layout = device.create_binding_set_layout(&BindingSetLayoutCreateInfo {
		entries: &[BindingLayoutEntry {
			ty: BindingType::SamplerTable { capacity: 8 },
			visibility: ShaderStages::FRAGMENT,
		}],
		name: "layout",
	})?;
	let set = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::SamplerTable(table)],
		name: "set",
	})?;
	let sampler = device.create_sampler(&SamplerCreateInfo {
		name: "sampler",
		..SamplerCreateInfo::default()
	})?;

	assert_eq!(device.bind_sampler(table, sampler, 7)?, None);
	assert_eq!(device.sampler_table_slot(table, 7), Some(sampler));
	assert_eq!(device.resolve_table_slot(set, 0, 7), Some(sampler.erase()));
	let id = device.implementation(sampler).id;
	assert_eq!(device.implementation(set).array_element(0, 7), Some(id));
	assert!(matches!(
		device.bind_sampler(table, sampler, 8),
		Err(TableError::OutOfRange { .. })
	));

	assert_eq!(device.unbind_sampler(table, 7)?, Some(sampler));
	assert_eq!(device.implementation(set).array_element(0, 7), None);
	device.destroy_sampler(sampler);
	Ok(())
}

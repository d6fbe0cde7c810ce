#![cfg(test)]

use crate::{device, sampled_texture, storage_buffer, table_layout, texture_table};
use gpu_rhi_core::descriptor::{
	BindingKind, BindingLayoutEntry, BindingMode, BindingResource, BindingSetCreateInfo, BindingSetLayoutCreateInfo,
	BindingType, BufferCreateInfo, BufferUsage, ResourceKind, SamplerCreateInfo, ShaderStages, TableCapacity,
	ValidationError,
};
use gpu_rhi_core::device::CreateError;
use gpu_rhi_core::platform::headless::NativeId;

#[test]
fn test_binding_count_mismatch() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE)?;
	device.platform().take_calls();

	let result = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer)],
		name: "set",
	});
	assert!(matches!(
		result,
		Err(CreateError::Validation(ValidationError::BindingCountMismatch {
			expected: 2,
			actual: 1,
			..
		}))
	));
	assert!(device.platform().calls().is_empty());
	assert_eq!(device.entry(buffer).users, 0);
	assert_eq!(device.entry(layout).users, 0);
	Ok(())
}

#[test]
fn test_binding_kind_mismatch() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	let texture = sampled_texture(&mut device, "texture")?;
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE)?;

	let result = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::SampledTexture(texture)],
		name: "set",
	});
	assert!(matches!(
		result,
		Err(CreateError::Validation(ValidationError::BindingKindMismatch {
			binding: 1,
			expected: BindingKind::TextureTable,
			actual: BindingKind::SampledTexture,
			..
		}))
	));
	Ok(())
}

#[test]
fn test_missing_usage() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let uniform = device.create_buffer(&BufferCreateInfo {
		size: 64,
		usage: BufferUsage::UNIFORM_BUFFER,
		name: "uniform",
	})?;
	let table = texture_table(&mut device, TableCapacity::Fixed(4))?;
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE)?;

	let result = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(uniform), BindingResource::TextureTable(table)],
		name: "set",
	});
	match result {
		Err(CreateError::Validation(ValidationError::MissingUsage {
			binding,
			kind,
			resource,
			expected,
			..
		})) => {
			assert_eq!(binding, 0);
			assert_eq!(kind, ResourceKind::Buffer);
			assert_eq!(resource, "uniform");
			assert_eq!(expected, BindingKind::StorageBuffer);
		}
		other => panic!("expected MissingUsage, got {other:?}"),
	}
	assert_eq!(device.entry(uniform).users, 0);
	Ok(())
}

#[test]
fn test_dead_handle() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	let table = texture_table(&mut device, TableCapacity::Fixed(4))?;
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE)?;
	device.destroy_buffer(buffer);

	let result = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
		name: "set",
	});
	assert!(matches!(
		result,
		Err(CreateError::Validation(ValidationError::DeadHandle {
			kind: ResourceKind::Buffer,
			..
		}))
	));

	device.destroy_binding_set_layout(layout);
	let buffer = storage_buffer(&mut device, "buffer")?;
	let result = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
		name: "set",
	});
	assert!(matches!(
		result,
		Err(CreateError::Validation(ValidationError::DeadHandle {
			kind: ResourceKind::BindingSetLayout,
			..
		}))
	));
	Ok(())
}

#[test]
fn test_static_bindings() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	let texture = sampled_texture(&mut device, "texture")?;
	let sampler = device.create_sampler(&SamplerCreateInfo {
		name: "sampler",
		..SamplerCreateInfo::default()
	})?;
	let table = texture_table(&mut device, TableCapacity::Fixed(16))?;
	let layout = device.create_binding_set_layout(&BindingSetLayoutCreateInfo {
		entries: &[
			BindingLayoutEntry {
				ty: BindingType::StorageBuffer,
				visibility: ShaderStages::COMPUTE,
			},
			BindingLayoutEntry {
				ty: BindingType::SampledTexture,
				visibility: ShaderStages::COMPUTE,
			},
			BindingLayoutEntry {
				ty: BindingType::Sampler,
				visibility: ShaderStages::COMPUTE,
			},
			BindingLayoutEntry {
				ty: BindingType::TextureTable { capacity: 16 },
				visibility: ShaderStages::COMPUTE,
			},
		],
		name: "layout",
	})?;
	let set = device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[
			BindingResource::StorageBuffer(buffer),
			BindingResource::SampledTexture(texture),
			BindingResource::Sampler(sampler),
			BindingResource::TextureTable(table),
		],
		name: "set",
	})?;

	assert_eq!(device.binding_mode(set, 0), Some(BindingMode::Static));
	assert_eq!(device.binding_mode(set, 1), Some(BindingMode::Static));
	assert_eq!(device.binding_mode(set, 2), Some(BindingMode::Static));
	assert_eq!(device.binding_mode(set, 3), Some(BindingMode::Dynamic));
	assert_eq!(device.binding_mode(set, 4), None);

	let native = device.implementation(set);
	assert_eq!(native.array_element(0, 0), Some(device.implementation(buffer).id));
	assert_eq!(native.array_element(1, 0), Some(device.implementation(texture).id));
	assert_eq!(native.array_element(2, 0), Some(device.implementation(sampler).id));
	assert_eq!(native.array_element(3, 0), None::<NativeId>);

	assert_eq!(device.entry(buffer).users, 1);
	assert_eq!(device.entry(texture).users, 1);
	assert_eq!(device.entry(sampler).users, 1);
	assert_eq!(device.entry(layout).users, 1);
	assert!(device.entry(table).meta.dependents().contains(&(set, 3)));

	device.destroy_binding_set(set);
	assert_eq!(device.entry(buffer).users, 0);
	assert_eq!(device.entry(texture).users, 0);
	assert_eq!(device.entry(sampler).users, 0);
	assert_eq!(device.entry(layout).users, 0);
	assert!(device.entry(table).meta.dependents().is_empty());
	Ok(())
}

#[test]
#[should_panic(expected = "while it is still in use by 1 other resources")]
fn test_destroy_bound_buffer() {
	let mut device = device(true).unwrap();
	let buffer = storage_buffer(&mut device, "buffer").unwrap();
	let table = texture_table(&mut device, TableCapacity::Fixed(4)).unwrap();
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE).unwrap();
	device
		.create_binding_set(&BindingSetCreateInfo {
			layout,
			bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
			name: "set",
		})
		.unwrap();
	device.destroy_buffer(buffer);
}

#[test]
#[should_panic(expected = "while it is still in use by 1 other resources")]
fn test_destroy_layout_in_use() {
	let mut device = device(true).unwrap();
	let buffer = storage_buffer(&mut device, "buffer").unwrap();
	let table = texture_table(&mut device, TableCapacity::Fixed(4)).unwrap();
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE).unwrap();
	device
		.create_binding_set(&BindingSetCreateInfo {
			layout,
			bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
			name: "set",
		})
		.unwrap();
	device.destroy_binding_set_layout(layout);
}

#[test]
fn test_layout_validation() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let empty = device.create_binding_set_layout(&BindingSetLayoutCreateInfo {
		entries: &[BindingLayoutEntry {
			ty: BindingType::UniformBuffer,
			visibility: ShaderStages::empty(),
		}],
		name: "invisible",
	});
	assert!(matches!(
		empty,
		Err(CreateError::Validation(ValidationError::EmptyVisibility { binding: 0, .. }))
	));
	let huge = device.create_binding_set_layout(&BindingSetLayoutCreateInfo {
		entries: &[BindingLayoutEntry {
			ty: BindingType::TextureTable { capacity: u32::MAX },
			visibility: ShaderStages::FRAGMENT,
		}],
		name: "huge",
	});
	assert!(matches!(
		huge,
		Err(CreateError::Validation(ValidationError::InvalidTableCapacity { .. }))
	));
	Ok(())
}

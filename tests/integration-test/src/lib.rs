use gpu_rhi_core::descriptor::{
	BindingLayoutEntry, BindingSetLayoutCreateInfo, BindingSetLayoutHandle, BindingType, BindlessTableCreateInfo,
	BufferCreateInfo, BufferHandle, BufferUsage, Extent, ShaderModuleCreateInfo, ShaderModuleHandle, ShaderStage,
	ShaderStages, TableCapacity, TextureCreateInfo, TextureHandle, TextureTableHandle, TextureUsage,
};
use gpu_rhi_core::device::{Device, DeviceCreateInfo};
use gpu_rhi_core::platform::headless::{Headless, HeadlessCreateInfo};

pub mod binding_sets;
pub mod bindless_tables;
pub mod pipelines;
pub mod teardown;

/// A headless device, with or without resource tracking.
pub fn device(debug_tracking: bool) -> anyhow::Result<Device<Headless>> {
	device_with(debug_tracking, HeadlessCreateInfo::default())
}

pub fn device_with(debug_tracking: bool, headless: HeadlessCreateInfo) -> anyhow::Result<Device<Headless>> {
	let _ = env_logger::builder().is_test(true).try_init();
	Ok(Device::new(
		DeviceCreateInfo {
			debug_tracking,
			limits: None,
			name: "integration-test",
		},
		headless,
	)?)
}

pub fn storage_buffer(device: &mut Device<Headless>, name: &str) -> anyhow::Result<BufferHandle> {
	Ok(device.create_buffer(&BufferCreateInfo {
		size: 256,
		usage: BufferUsage::STORAGE_BUFFER,
		name,
	})?)
}

pub fn sampled_texture(device: &mut Device<Headless>, name: &str) -> anyhow::Result<TextureHandle> {
	Ok(device.create_texture(&TextureCreateInfo {
		extent: Extent::new(16, 16, 1),
		usage: TextureUsage::SAMPLED,
		name,
		..TextureCreateInfo::default()
	})?)
}

pub fn texture_table(device: &mut Device<Headless>, capacity: TableCapacity) -> anyhow::Result<TextureTableHandle> {
	Ok(device.create_texture_table(&BindlessTableCreateInfo {
		capacity,
		name: "textures",
	})?)
}

/// A layout with a storage buffer at binding 0 and a texture table of `capacity` at binding 1.
pub fn table_layout(
	device: &mut Device<Headless>,
	capacity: u32,
	visibility: ShaderStages,
) -> anyhow::Result<BindingSetLayoutHandle> {
	Ok(device.create_binding_set_layout(&BindingSetLayoutCreateInfo {
		entries: &[
			BindingLayoutEntry {
				ty: BindingType::StorageBuffer,
				visibility,
			},
			BindingLayoutEntry {
				ty: BindingType::TextureTable { capacity },
				visibility,
			},
		],
		name: "table layout",
	})?)
}

/// A fake SPIR-V binary, the headless platform does not look at shader code.
pub const SHADER_CODE: &[u8] = &[0x03, 0x02, 0x23, 0x07, 0, 0, 0, 0];

pub fn shader(device: &mut Device<Headless>, stage: ShaderStage) -> anyhow::Result<ShaderModuleHandle> {
	Ok(device.create_shader_module(&ShaderModuleCreateInfo {
		stage,
		code: SHADER_CODE,
		entry_point: "main",
		name: "shader",
	})?)
}

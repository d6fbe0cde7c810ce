#![cfg(test)]

use crate::{device, sampled_texture, shader, storage_buffer, table_layout, texture_table};
use gpu_rhi_core::descriptor::{BindingResource, BindingSetCreateInfo, ResourceKind, ShaderStage, ShaderStages, TableCapacity};
use gpu_rhi_core::pipeline::ComputePipelineCreateInfo;
use gpu_rhi_core::platform::headless::HeadlessCall;

#[test]
fn test_leak_report() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let kept = storage_buffer(&mut device, "kept")?;
	storage_buffer(&mut device, "leaked buffer")?;
	sampled_texture(&mut device, "leaked texture")?;
	device.destroy_buffer(kept);

	let report = device.shutdown();
	assert_eq!(report.len(), 2);
	assert_eq!(report.count(ResourceKind::Buffer), 1);
	assert_eq!(report.count(ResourceKind::Texture), 1);
	assert_eq!(report.count(ResourceKind::Sampler), 0);
	let labels = report.leaks.iter().map(|leak| leak.label.as_str()).collect::<Vec<_>>();
	assert_eq!(labels, ["leaked buffer", "leaked texture"]);
	assert!(report.to_string().contains("2 leaked resources"));
	Ok(())
}

#[test]
fn test_no_leaks() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	device.destroy_buffer(buffer);
	let report = device.shutdown();
	assert!(report.is_empty());
	assert!(report.to_string().contains("no leaks"));
	Ok(())
}

#[test]
fn test_leaked_dependency_graph() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	let texture = sampled_texture(&mut device, "texture")?;
	let table = texture_table(&mut device, TableCapacity::Fixed(4))?;
	device.bind_texture(table, texture, 0)?;
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE)?;
	device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
		name: "set",
	})?;
	let shader = shader(&mut device, ShaderStage::Compute)?;
	device.create_compute_pipeline(&ComputePipelineCreateInfo {
		shader,
		layouts: &[layout],
		name: "pipeline",
	})?;
	let created = device
		.platform()
		.calls()
		.iter()
		.filter(|call| matches!(call, HeadlessCall::Create { .. }))
		.count();

	// teardown must not trip over users or dependents of leaked resources
	let report = device.shutdown();
	assert_eq!(report.len(), created);
	for kind in [
		ResourceKind::Buffer,
		ResourceKind::Texture,
		ResourceKind::TextureTable,
		ResourceKind::BindingSetLayout,
		ResourceKind::BindingSet,
		ResourceKind::ShaderModule,
		ResourceKind::ComputePipeline,
	] {
		assert_eq!(report.count(kind), 1, "{kind}");
	}
	Ok(())
}

#[test]
fn test_untracked_report_is_empty() -> anyhow::Result<()> {
	let mut device = device(false)?;
	let buffer = storage_buffer(&mut device, "buffer")?;
	let table = texture_table(&mut device, TableCapacity::Fixed(4))?;
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE)?;
	device.create_binding_set(&BindingSetCreateInfo {
		layout,
		bindings: &[BindingResource::StorageBuffer(buffer), BindingResource::TextureTable(table)],
		name: "set",
	})?;
	assert_eq!(device.live_count(), 4);
	assert!(device.shutdown().is_empty());
	Ok(())
}

#[test]
fn test_drop_without_shutdown() -> anyhow::Result<()> {
	let mut device = device(true)?;
	storage_buffer(&mut device, "buffer")?;
	sampled_texture(&mut device, "texture")?;
	drop(device);
	Ok(())
}

#[test]
fn test_destroy_calls_reach_platform() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let texture = sampled_texture(&mut device, "texture")?;
	let id = device.implementation(texture).id;
	device.platform().take_calls();
	device.destroy_texture(texture);
	assert_eq!(
		device.platform().take_calls(),
		vec![HeadlessCall::Destroy {
			kind: ResourceKind::Texture,
			id,
		}]
	);
	assert_eq!(device.platform().memory_used(), 0);
	Ok(())
}

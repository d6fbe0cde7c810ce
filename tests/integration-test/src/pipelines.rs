#![cfg(test)]

use crate::{device, shader, table_layout};
use gpu_rhi_core::descriptor::{Format, ResourceKind, ShaderStage, ShaderStages, ValidationError};
use gpu_rhi_core::device::CreateError;
use gpu_rhi_core::pipeline::{
	CompareOp, ComputePipelineCreateInfo, CullMode, GraphicsPipelineCreateInfo, PrimitiveTopology,
};

#[test]
fn test_compute_pipeline() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let shader = shader(&mut device, ShaderStage::Compute)?;
	let layout = table_layout(&mut device, 128, ShaderStages::COMPUTE)?;
	let pipeline = device.create_compute_pipeline(&ComputePipelineCreateInfo {
		shader,
		layouts: &[layout],
		name: "compute",
	})?;
	assert_eq!(device.meta(pipeline).stages, ShaderStages::COMPUTE);
	assert_eq!(device.meta(pipeline).layouts.as_slice(), &[layout]);
	assert_eq!(
		device.implementation(pipeline).layouts.as_slice(),
		&[device.implementation(layout).id]
	);
	assert_eq!(device.entry(layout).users, 1);

	// shader modules may be destroyed once the pipeline exists
	device.destroy_shader_module(shader);
	assert!(device.is_alive(pipeline));

	device.destroy_compute_pipeline(pipeline);
	assert_eq!(device.entry(layout).users, 0);
	device.destroy_binding_set_layout(layout);
	assert!(device.shutdown().is_empty());
	Ok(())
}

#[test]
fn test_graphics_pipeline() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let vertex = shader(&mut device, ShaderStage::Vertex)?;
	let fragment = shader(&mut device, ShaderStage::Fragment)?;
	let layout = table_layout(&mut device, 16, ShaderStages::ALL_GRAPHICS)?;
	let pipeline = device.create_graphics_pipeline(&GraphicsPipelineCreateInfo {
		vertex,
		fragment: Some(fragment),
		layouts: &[layout, layout],
		topology: PrimitiveTopology::TriangleStrip,
		cull_mode: CullMode::Back,
		depth_test: Some(CompareOp::LessOrEqual),
		color_formats: &[Format::Bgra8Srgb],
		depth_format: Some(Format::D32Float),
		name: "graphics",
	})?;
	assert_eq!(device.meta(pipeline).stages, ShaderStages::ALL_GRAPHICS);
	assert_eq!(device.entry(layout).users, 2);

	let depth_only = device.create_graphics_pipeline(&GraphicsPipelineCreateInfo {
		vertex,
		fragment: None,
		layouts: &[],
		topology: PrimitiveTopology::default(),
		cull_mode: CullMode::default(),
		depth_test: Some(CompareOp::Less),
		color_formats: &[],
		depth_format: Some(Format::D16Unorm),
		name: "depth only",
	})?;
	assert_eq!(device.meta(depth_only).stages, ShaderStages::VERTEX);

	device.destroy_graphics_pipeline(pipeline);
	device.destroy_graphics_pipeline(depth_only);
	assert_eq!(device.entry(layout).users, 0);
	Ok(())
}

#[test]
fn test_wrong_shader_stage() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let vertex = shader(&mut device, ShaderStage::Vertex)?;
	device.platform().take_calls();

	let result = device.create_compute_pipeline(&ComputePipelineCreateInfo {
		shader: vertex,
		layouts: &[],
		name: "compute",
	});
	assert!(matches!(
		result,
		Err(CreateError::Validation(ValidationError::WrongShaderStage {
			expected: ShaderStage::Compute,
			actual: ShaderStage::Vertex,
			..
		}))
	));

	let result = device.create_graphics_pipeline(&GraphicsPipelineCreateInfo {
		vertex,
		fragment: Some(vertex),
		layouts: &[],
		topology: PrimitiveTopology::default(),
		cull_mode: CullMode::default(),
		depth_test: None,
		color_formats: &[Format::Rgba8Unorm],
		depth_format: None,
		name: "graphics",
	});
	assert!(matches!(
		result,
		Err(CreateError::Validation(ValidationError::WrongShaderStage {
			expected: ShaderStage::Fragment,
			..
		}))
	));
	assert!(device.platform().calls().is_empty());
	Ok(())
}

#[test]
fn test_layout_not_visible() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let shader = shader(&mut device, ShaderStage::Compute)?;
	let layout = table_layout(&mut device, 4, ShaderStages::FRAGMENT)?;
	let result = device.create_compute_pipeline(&ComputePipelineCreateInfo {
		shader,
		layouts: &[layout],
		name: "compute",
	});
	assert!(matches!(
		result,
		Err(CreateError::Validation(ValidationError::LayoutNotVisible {
			set: 0,
			binding: 0,
			..
		}))
	));
	assert_eq!(device.entry(layout).users, 0);
	Ok(())
}

#[test]
fn test_too_many_bind_sets() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let shader = shader(&mut device, ShaderStage::Compute)?;
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE)?;
	let max = device.limits().max_bind_sets as usize;
	let layouts = vec![layout; max + 1];
	let result = device.create_compute_pipeline(&ComputePipelineCreateInfo {
		shader,
		layouts: &layouts,
		name: "compute",
	});
	assert!(matches!(
		result,
		Err(CreateError::Validation(ValidationError::TooManyBindSets { .. }))
	));

	device.create_compute_pipeline(&ComputePipelineCreateInfo {
		shader,
		layouts: &layouts[..max],
		name: "compute",
	})?;
	assert_eq!(device.entry(layout).users, max as u32);
	Ok(())
}

#[test]
fn test_dead_shader_module() -> anyhow::Result<()> {
	let mut device = device(true)?;
	let shader = shader(&mut device, ShaderStage::Compute)?;
	device.destroy_shader_module(shader);
	let result = device.create_compute_pipeline(&ComputePipelineCreateInfo {
		shader,
		layouts: &[],
		name: "compute",
	});
	assert!(matches!(
		result,
		Err(CreateError::Validation(ValidationError::DeadHandle {
			kind: ResourceKind::ShaderModule,
			..
		}))
	));
	Ok(())
}

#[test]
#[should_panic(expected = "while it is still in use by 1 other resources")]
fn test_destroy_layout_used_by_pipeline() {
	let mut device = device(true).unwrap();
	let shader = shader(&mut device, ShaderStage::Compute).unwrap();
	let layout = table_layout(&mut device, 4, ShaderStages::COMPUTE).unwrap();
	device
		.create_compute_pipeline(&ComputePipelineCreateInfo {
			shader,
			layouts: &[layout],
			name: "compute",
		})
		.unwrap();
	device.destroy_binding_set_layout(layout);
}

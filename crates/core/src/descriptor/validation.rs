use crate::descriptor::{BindingKind, Extent, Format, ResourceKind, ShaderStage, ShaderStages, TextureDimension};
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;

/// Malformed creation parameters. Always detected before the platform is called or anything is registered, so the
/// failed create call had no side effects.
#[derive(Error, Clone, PartialEq)]
pub enum ValidationError {
	#[error("Buffer \"{name}\" must not have a size of 0")]
	ZeroBufferSize { name: String },
	#[error("Buffer \"{name}\" has a size of {size} bytes, exceeding the maximum of {max} bytes")]
	BufferTooLarge { name: String, size: u64, max: u64 },
	#[error("{kind} \"{name}\" must have at least one usage declared")]
	NoUsageDeclared { kind: ResourceKind, name: String },

	#[error("Texture \"{name}\" has a zero sized dimension in its extent {extent:?}")]
	ZeroExtent { name: String, extent: Extent },
	#[error("Texture \"{name}\" of dimension {dimension:?} must have unused dimensions set to 1, but its extent is {extent:?}")]
	UnusedDimension {
		name: String,
		extent: Extent,
		dimension: TextureDimension,
	},
	#[error("Texture \"{name}\" with extent {extent:?} exceeds the maximum dimension of {max}")]
	TextureTooLarge { name: String, extent: Extent, max: u32 },
	#[error("Cube texture \"{name}\" must have equal width and height, but its extent is {extent:?}")]
	NonSquareCube { name: String, extent: Extent },
	#[error("Texture \"{name}\" has {mip_levels} mip levels, must be between 1 and {max}")]
	InvalidMipLevels { name: String, mip_levels: u32, max: u32 },
	#[error("Texture \"{name}\" of dimension {dimension:?} can not have {array_layers} array layers")]
	InvalidArrayLayers {
		name: String,
		array_layers: u32,
		dimension: TextureDimension,
	},
	#[error("Multisampled texture \"{name}\" must have exactly one mip level")]
	MultisampledMips { name: String },

	#[error("Sampler \"{name}\" has an invalid lod range of {min_lod} to {max_lod:?}")]
	InvalidLodRange {
		name: String,
		min_lod: f32,
		max_lod: Option<f32>,
	},
	#[error("Sampler \"{name}\" has a max anisotropy of {max_anisotropy}, must be between 1 and 16")]
	InvalidAnisotropy { name: String, max_anisotropy: f32 },

	#[error("ShaderModule \"{name}\" has no code")]
	EmptyShaderCode { name: String },
	#[error("ShaderModule \"{name}\" has {len} bytes of code, which is not a multiple of 4")]
	MisalignedShaderCode { name: String, len: usize },
	#[error("ShaderModule \"{name}\" must have an entry point")]
	EmptyEntryPoint { name: String },

	#[error("BindingSetLayout \"{name}\" binding {binding} is not visible to any shader stage")]
	EmptyVisibility { name: String, binding: u32 },
	#[error("BindingSetLayout \"{name}\" declares {count} bindings, exceeding the maximum of {max}")]
	TooManyBindings { name: String, count: u32, max: u32 },
	#[error("{kind} \"{name}\" has a capacity of {capacity}, must be between 1 and {max}")]
	InvalidTableCapacity {
		kind: ResourceKind,
		name: String,
		capacity: u32,
		max: u32,
	},

	#[error("BindingSet \"{name}\" supplies {actual} bindings, but its layout declares {expected}")]
	BindingCountMismatch { name: String, expected: usize, actual: usize },
	#[error("BindingSet \"{name}\" binding {binding} supplies a {actual:?}, but its layout declares a {expected:?}")]
	BindingKindMismatch {
		name: String,
		binding: u32,
		expected: BindingKind,
		actual: BindingKind,
	},
	#[error("BindingSet \"{name}\" binding {binding} supplies a table of capacity {capacity}, exceeding the capacity of {max} declared in its layout")]
	TableCapacityExceedsLayout {
		name: String,
		binding: u32,
		capacity: u32,
		max: u32,
	},
	#[error("BindingSet \"{name}\" binding {binding} supplies {kind} \"{resource}\", which is missing the usage required by {expected:?}")]
	MissingUsage {
		name: String,
		binding: u32,
		kind: ResourceKind,
		resource: String,
		expected: BindingKind,
	},
	#[error("\"{name}\" references a {kind} that has already been destroyed or belongs to another device")]
	DeadHandle { name: String, kind: ResourceKind },

	#[error("Pipeline \"{name}\" expected a {expected:?} shader, but got ShaderModule \"{module}\" of stage {actual:?}")]
	WrongShaderStage {
		name: String,
		module: String,
		expected: ShaderStage,
		actual: ShaderStage,
	},
	#[error("Pipeline \"{name}\" references {count} binding set layouts, exceeding the maximum of {max}")]
	TooManyBindSets { name: String, count: u32, max: u32 },
	#[error("Pipeline \"{name}\" with stages {stages:?} can not access set {set} binding {binding}, which is only visible to {visibility:?}")]
	LayoutNotVisible {
		name: String,
		set: u32,
		binding: u32,
		stages: ShaderStages,
		visibility: ShaderStages,
	},
	#[error("GraphicsPipeline \"{name}\" color attachment {index} can not have depth format {format:?}")]
	InvalidColorFormat { name: String, index: u32, format: Format },
	#[error("GraphicsPipeline \"{name}\" depth attachment can not have color format {format:?}")]
	InvalidDepthFormat { name: String, format: Format },
	#[error("GraphicsPipeline \"{name}\" must have at least one attachment")]
	NoAttachments { name: String },
}

impl Debug for ValidationError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self, f)
	}
}

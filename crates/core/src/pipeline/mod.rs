mod compute_pipeline;
mod graphics_pipeline;

pub use compute_pipeline::*;
pub use graphics_pipeline::*;

use crate::descriptor::{
	BindingSetLayoutHandle, BindingSetLayoutMeta, DeviceLimits, ShaderModuleMeta, ShaderStage, ShaderStages,
	ValidationError,
};
use crate::device::Entry;
use smallvec::SmallVec;

/// What the [`Device`](crate::device::Device) remembers about a graphics or compute pipeline.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PipelineMeta {
	pub stages: ShaderStages,
	/// The layouts of the binding sets, by set index. Kept alive until the pipeline is destroyed.
	pub layouts: SmallVec<[BindingSetLayoutHandle; 4]>,
}

pub(crate) fn check_stage<O>(
	name: &str,
	module: &Entry<O, ShaderModuleMeta>,
	expected: ShaderStage,
) -> Result<(), ValidationError> {
	if module.meta.stage == expected {
		Ok(())
	} else {
		Err(ValidationError::WrongShaderStage {
			name: name.to_owned(),
			module: module.name.clone(),
			expected,
			actual: module.meta.stage,
		})
	}
}

/// Checks that a pipeline consisting of `stages` can use binding sets of `layouts`: no more layouts than the device
/// supports, and every binding must be visible to at least one stage of the pipeline.
pub(crate) fn validate_layouts<'a>(
	name: &str,
	stages: ShaderStages,
	layouts: impl ExactSizeIterator<Item = &'a BindingSetLayoutMeta>,
	limits: &DeviceLimits,
) -> Result<(), ValidationError> {
	let count = layouts.len() as u32;
	if count > limits.max_bind_sets {
		return Err(ValidationError::TooManyBindSets {
			name: name.to_owned(),
			count,
			max: limits.max_bind_sets,
		});
	}
	for (set, layout) in layouts.enumerate() {
		for (binding, entry) in layout.entries.iter().enumerate() {
			if !entry.visibility.intersects(stages) {
				return Err(ValidationError::LayoutNotVisible {
					name: name.to_owned(),
					set: set as u32,
					binding: binding as u32,
					stages,
					visibility: entry.visibility,
				});
			}
		}
	}
	Ok(())
}

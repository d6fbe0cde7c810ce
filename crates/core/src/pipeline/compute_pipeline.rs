use crate::descriptor::{
	kind, BindingSetLayoutHandle, ComputePipelineHandle, ShaderModuleHandle, ShaderStage, ShaderStages,
};
use crate::device::{CreateError, Device};
use crate::pipeline::{check_stage, validate_layouts, PipelineMeta};
use crate::platform::Platform;
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug)]
pub struct ComputePipelineCreateInfo<'a> {
	pub shader: ShaderModuleHandle,
	/// The layouts of the binding sets, by set index.
	pub layouts: &'a [BindingSetLayoutHandle],
	/// Name of the pipeline, for tracking and debugging purposes
	pub name: &'a str,
}

impl<P: Platform> Device<P> {
	pub fn create_compute_pipeline(
		&mut self,
		create_info: &ComputePipelineCreateInfo,
	) -> Result<ComputePipelineHandle, CreateError<P>> {
		let name = create_info.name;
		let shader = self.lookup(create_info.shader, name)?;
		check_stage(name, shader, ShaderStage::Compute)?;
		let layouts = create_info
			.layouts
			.iter()
			.map(|layout| self.lookup(*layout, name))
			.collect::<Result<SmallVec<[_; 4]>, _>>()?;
		validate_layouts(
			name,
			ShaderStages::COMPUTE,
			layouts.iter().map(|layout| &layout.meta),
			self.limits(),
		)?;

		self.check_capacity::<kind::ComputePipeline>()?;
		let native_layouts = layouts.iter().map(|layout| &layout.object).collect::<SmallVec<[_; 4]>>();
		let object = unsafe {
			self.platform()
				.create_compute_pipeline(create_info, &shader.object, &native_layouts)
		}
		.map_err(CreateError::Platform)?;
		drop(native_layouts);
		drop(layouts);

		let meta = PipelineMeta {
			stages: ShaderStages::COMPUTE,
			layouts: SmallVec::from_slice(create_info.layouts),
		};
		let pipeline = self.insert(object, meta, name);
		for layout in create_info.layouts {
			self.acquire(*layout);
		}
		Ok(pipeline)
	}

	/// # Panics
	/// If `pipeline` was already destroyed or belongs to another device.
	#[track_caller]
	pub fn destroy_compute_pipeline(&mut self, pipeline: ComputePipelineHandle) {
		let meta = self.retire(pipeline);
		for layout in meta.layouts {
			self.release(layout);
		}
	}
}

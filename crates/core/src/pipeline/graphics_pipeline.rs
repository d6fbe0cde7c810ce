use crate::descriptor::{
	kind, BindingSetLayoutHandle, Format, GraphicsPipelineHandle, ShaderModuleHandle, ShaderStage, ShaderStages,
	ValidationError,
};
use crate::device::{CreateError, Device};
use crate::pipeline::{check_stage, validate_layouts, PipelineMeta};
use crate::platform::Platform;
use smallvec::SmallVec;

/// Primitive type the input is interpreted as.
///
/// Docs copied from wgpu.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PrimitiveTopology {
	/// Vertex data is a list of points. Each vertex is a new point.
	PointList,
	/// Vertex data is a list of lines. Each pair of vertices composes a new line.
	LineList,
	/// Vertex data is a strip of lines. Each set of two adjacent vertices form a line.
	LineStrip,
	/// Vertex data is a list of triangles. Each set of 3 vertices composes a new triangle.
	#[default]
	TriangleList,
	/// Vertex data is a triangle strip. Each set of three adjacent vertices form a triangle.
	TriangleStrip,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CullMode {
	#[default]
	None,
	Front,
	Back,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CompareOp {
	Never,
	#[default]
	Less,
	Equal,
	LessOrEqual,
	Greater,
	NotEqual,
	GreaterOrEqual,
	Always,
}

#[derive(Copy, Clone, Debug)]
pub struct GraphicsPipelineCreateInfo<'a> {
	pub vertex: ShaderModuleHandle,
	/// May be None for depth only rendering.
	pub fragment: Option<ShaderModuleHandle>,
	/// The layouts of the binding sets, by set index.
	pub layouts: &'a [BindingSetLayoutHandle],
	pub topology: PrimitiveTopology,
	pub cull_mode: CullMode,
	/// Enables depth testing with the supplied compare op.
	pub depth_test: Option<CompareOp>,
	pub color_formats: &'a [Format],
	pub depth_format: Option<Format>,
	/// Name of the pipeline, for tracking and debugging purposes
	pub name: &'a str,
}

impl GraphicsPipelineCreateInfo<'_> {
	pub fn validate_formats(&self) -> Result<(), ValidationError> {
		if self.color_formats.is_empty() && self.depth_format.is_none() {
			return Err(ValidationError::NoAttachments {
				name: self.name.to_owned(),
			});
		}
		if let Some((index, format)) = self.color_formats.iter().enumerate().find(|(_, f)| f.is_depth()) {
			return Err(ValidationError::InvalidColorFormat {
				name: self.name.to_owned(),
				index: index as u32,
				format: *format,
			});
		}
		match self.depth_format {
			Some(format) if !format.is_depth() => Err(ValidationError::InvalidDepthFormat {
				name: self.name.to_owned(),
				format,
			}),
			_ => Ok(()),
		}
	}
}

impl<P: Platform> Device<P> {
	/// Create a graphics pipeline. Its binding set layouts are kept alive until the pipeline is destroyed, its shader
	/// modules are not.
	pub fn create_graphics_pipeline(
		&mut self,
		create_info: &GraphicsPipelineCreateInfo,
	) -> Result<GraphicsPipelineHandle, CreateError<P>> {
		let name = create_info.name;
		create_info.validate_formats()?;
		let vertex = self.lookup(create_info.vertex, name)?;
		check_stage(name, vertex, ShaderStage::Vertex)?;
		let mut stages = ShaderStages::VERTEX;
		let fragment = match create_info.fragment {
			Some(fragment) => {
				let fragment = self.lookup(fragment, name)?;
				check_stage(name, fragment, ShaderStage::Fragment)?;
				stages |= ShaderStages::FRAGMENT;
				Some(fragment)
			}
			None => None,
		};
		let layouts = create_info
			.layouts
			.iter()
			.map(|layout| self.lookup(*layout, name))
			.collect::<Result<SmallVec<[_; 4]>, _>>()?;
		validate_layouts(name, stages, layouts.iter().map(|layout| &layout.meta), self.limits())?;

		self.check_capacity::<kind::GraphicsPipeline>()?;
		let native_layouts = layouts.iter().map(|layout| &layout.object).collect::<SmallVec<[_; 4]>>();
		let object = unsafe {
			self.platform().create_graphics_pipeline(
				create_info,
				&vertex.object,
				fragment.map(|fragment| &fragment.object),
				&native_layouts,
			)
		}
		.map_err(CreateError::Platform)?;
		drop(native_layouts);
		drop(layouts);

		let meta = PipelineMeta {
			stages,
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
	pub fn destroy_graphics_pipeline(&mut self, pipeline: GraphicsPipelineHandle) {
		let meta = self.retire(pipeline);
		for layout in meta.layouts {
			self.release(layout);
		}
	}
}

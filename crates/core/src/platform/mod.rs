#[cfg(feature = "headless")]
pub mod headless;

use crate::descriptor::{
	BindingSetCreateInfo, BindingSetLayoutCreateInfo, BindlessTableCreateInfo, BufferCreateInfo, DeviceLimits,
	SamplerCreateInfo, ShaderModuleCreateInfo, TextureCreateInfo,
};
use crate::pipeline::{ComputePipelineCreateInfo, GraphicsPipelineCreateInfo};
use std::error::Error;

/// Internal interface of a graphics backend, may change at any time!
///
/// Every `create_*` function receives create infos which have already been validated by the
/// [`Device`](crate::device::Device), and any native objects they reference are guaranteed to be alive.
///
/// # Safety
/// Native objects returned by `create_*` must stay valid until they are passed to the matching `destroy_*` function.
pub unsafe trait Platform: Sized + Send + Sync + 'static {
	type PlatformCreateInfo: 'static;
	type PlatformCreateError: Error + Send + Sync + 'static;
	type AllocationError: Error + Send + Sync + 'static;
	type Buffer: 'static + Send + Sync;
	type Texture: 'static + Send + Sync;
	type Sampler: 'static + Send + Sync;
	type ShaderModule: 'static + Send + Sync;
	type BindingSetLayout: 'static + Send + Sync;
	type BindingSet: 'static + Send + Sync;
	type GraphicsPipeline: 'static + Send + Sync;
	type ComputePipeline: 'static + Send + Sync;
	type TextureTable: 'static + Send + Sync;
	type SamplerTable: 'static + Send + Sync;

	/// Create the platform from the supplied [`Self::PlatformCreateInfo`], which typically wraps the native instance
	/// and device initialized by the end user.
	unsafe fn create_platform(create_info: Self::PlatformCreateInfo) -> Result<Self, Self::PlatformCreateError>;

	/// The maximum limits supported by the hardware.
	fn limits(&self) -> DeviceLimits;

	unsafe fn create_buffer(&self, create_info: &BufferCreateInfo) -> Result<Self::Buffer, Self::AllocationError>;

	unsafe fn create_texture(&self, create_info: &TextureCreateInfo) -> Result<Self::Texture, Self::AllocationError>;

	unsafe fn create_sampler(&self, create_info: &SamplerCreateInfo) -> Result<Self::Sampler, Self::AllocationError>;

	unsafe fn create_shader_module(
		&self,
		create_info: &ShaderModuleCreateInfo,
	) -> Result<Self::ShaderModule, Self::AllocationError>;

	unsafe fn create_binding_set_layout(
		&self,
		create_info: &BindingSetLayoutCreateInfo,
	) -> Result<Self::BindingSetLayout, Self::AllocationError>;

	/// Create a binding set with the supplied bindings, one per layout entry. Table bindings start out with all slots
	/// empty, the [`Device`](crate::device::Device) writes occupied slots afterward using
	/// [`Self::write_texture_table_slot`] and [`Self::write_sampler_table_slot`].
	unsafe fn create_binding_set(
		&self,
		layout: &Self::BindingSetLayout,
		create_info: &BindingSetCreateInfo,
		bindings: &[NativeBinding<'_, Self>],
	) -> Result<Self::BindingSet, Self::AllocationError>;

	unsafe fn create_graphics_pipeline(
		&self,
		create_info: &GraphicsPipelineCreateInfo,
		vertex: &Self::ShaderModule,
		fragment: Option<&Self::ShaderModule>,
		layouts: &[&Self::BindingSetLayout],
	) -> Result<Self::GraphicsPipeline, Self::AllocationError>;

	unsafe fn create_compute_pipeline(
		&self,
		create_info: &ComputePipelineCreateInfo,
		shader: &Self::ShaderModule,
		layouts: &[&Self::BindingSetLayout],
	) -> Result<Self::ComputePipeline, Self::AllocationError>;

	unsafe fn create_texture_table(
		&self,
		create_info: &BindlessTableCreateInfo,
	) -> Result<Self::TextureTable, Self::AllocationError>;

	unsafe fn create_sampler_table(
		&self,
		create_info: &BindlessTableCreateInfo,
	) -> Result<Self::SamplerTable, Self::AllocationError>;

	/// Update slot `index` of the table bound at `binding` of `set`, `None` clears the slot.
	///
	/// # Safety
	/// `binding` must be a texture table binding of `set` and `index` must be within its capacity. The caller is
	/// responsible for `set` not being in use by any GPU work currently in flight.
	unsafe fn write_texture_table_slot(
		&self,
		set: &mut Self::BindingSet,
		binding: u32,
		index: u32,
		texture: Option<&Self::Texture>,
	);

	/// Update slot `index` of the table bound at `binding` of `set`, `None` clears the slot.
	///
	/// # Safety
	/// `binding` must be a sampler table binding of `set` and `index` must be within its capacity. The caller is
	/// responsible for `set` not being in use by any GPU work currently in flight.
	unsafe fn write_sampler_table_slot(
		&self,
		set: &mut Self::BindingSet,
		binding: u32,
		index: u32,
		sampler: Option<&Self::Sampler>,
	);

	unsafe fn destroy_buffer(&self, buffer: Self::Buffer);

	unsafe fn destroy_texture(&self, texture: Self::Texture);

	unsafe fn destroy_sampler(&self, sampler: Self::Sampler);

	unsafe fn destroy_shader_module(&self, shader_module: Self::ShaderModule);

	unsafe fn destroy_binding_set_layout(&self, layout: Self::BindingSetLayout);

	unsafe fn destroy_binding_set(&self, set: Self::BindingSet);

	unsafe fn destroy_graphics_pipeline(&self, pipeline: Self::GraphicsPipeline);

	unsafe fn destroy_compute_pipeline(&self, pipeline: Self::ComputePipeline);

	unsafe fn destroy_texture_table(&self, table: Self::TextureTable);

	unsafe fn destroy_sampler_table(&self, table: Self::SamplerTable);
}

/// The native object bound to one binding of a binding set that is being created.
pub enum NativeBinding<'a, P: Platform> {
	UniformBuffer(&'a P::Buffer),
	StorageBuffer(&'a P::Buffer),
	SampledTexture(&'a P::Texture),
	StorageTexture(&'a P::Texture),
	Sampler(&'a P::Sampler),
	TextureTable(&'a P::TextureTable),
	SamplerTable(&'a P::SamplerTable),
}

//! An in-memory [`Platform`] without any GPU. Native objects are plain structs identified by a [`NativeId`], buffers
//! and textures count against a simulated memory budget, and binding sets hold simulated descriptor arrays which table
//! writes update. Every call is recorded, see [`Headless::calls`].

use crate::backing::slot_array::SlotArray;
use crate::descriptor::{
	BindingSetCreateInfo, BindingSetLayoutCreateInfo, BindingType, BindlessTableCreateInfo, BufferCreateInfo,
	DeviceLimits, ResourceKind, SamplerCreateInfo, ShaderModuleCreateInfo, ShaderStage, TextureCreateInfo,
};
use crate::pipeline::{ComputePipelineCreateInfo, GraphicsPipelineCreateInfo};
use crate::platform::{NativeBinding, Platform};
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NativeId(pub u64);

impl Display for NativeId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "native#{}", self.0)
	}
}

#[derive(Copy, Clone, Debug)]
pub struct HeadlessCreateInfo {
	/// Bytes of simulated device memory available to buffers and textures.
	pub memory_budget: u64,
	/// The limits reported as supported by the hardware.
	pub limits: DeviceLimits,
}

impl HeadlessCreateInfo {
	pub const HARDWARE_LIMITS: DeviceLimits = DeviceLimits {
		max_buffer_size: 1 << 32,
		max_texture_dimension: 16384,
		max_texture_array_layers: 2048,
		max_table_capacity: 500_000,
		max_bind_sets: 8,
		max_bindings_per_layout: 64,
	};
}

impl Default for HeadlessCreateInfo {
	fn default() -> Self {
		Self {
			memory_budget: 256 << 20,
			limits: Self::HARDWARE_LIMITS,
		}
	}
}

/// A native call recorded by [`Headless`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HeadlessCall {
	Create {
		kind: ResourceKind,
		id: NativeId,
		name: String,
	},
	WriteSlot {
		set: NativeId,
		binding: u32,
		index: u32,
		resource: Option<NativeId>,
	},
	Destroy {
		kind: ResourceKind,
		id: NativeId,
	},
}

#[derive(Debug, Default)]
struct HeadlessState {
	memory_used: u64,
	live_objects: usize,
	calls: Vec<HeadlessCall>,
}

pub struct Headless {
	memory_budget: u64,
	limits: DeviceLimits,
	next_id: AtomicU64,
	state: Mutex<HeadlessState>,
}

impl Headless {
	/// All native calls in the order they happened.
	pub fn calls(&self) -> Vec<HeadlessCall> {
		self.state.lock().calls.clone()
	}

	/// Takes all recorded native calls, leaving the call log empty.
	pub fn take_calls(&self) -> Vec<HeadlessCall> {
		std::mem::take(&mut self.state.lock().calls)
	}

	pub fn memory_used(&self) -> u64 {
		self.state.lock().memory_used
	}

	pub fn memory_budget(&self) -> u64 {
		self.memory_budget
	}

	/// The amount of native objects that have been created but not yet destroyed.
	pub fn live_objects(&self) -> usize {
		self.state.lock().live_objects
	}

	fn create(&self, kind: ResourceKind, name: &str, memory: u64) -> Result<NativeId, HeadlessAllocationError> {
		let mut state = self.state.lock();
		let available = self.memory_budget - state.memory_used;
		if memory > available {
			return Err(HeadlessAllocationError::OutOfDeviceMemory {
				requested: memory,
				available,
			});
		}
		state.memory_used += memory;
		state.live_objects += 1;
		let id = NativeId(self.next_id.fetch_add(1, Relaxed));
		state.calls.push(HeadlessCall::Create {
			kind,
			id,
			name: name.to_owned(),
		});
		Ok(id)
	}

	fn destroy(&self, kind: ResourceKind, id: NativeId, memory: u64) {
		let mut state = self.state.lock();
		state.memory_used -= memory;
		state.live_objects -= 1;
		state.calls.push(HeadlessCall::Destroy { kind, id });
	}

	fn write_slot(&self, set: &mut HeadlessBindingSet, binding: u32, index: u32, resource: Option<NativeId>) {
		match set.descriptors.get_mut(binding as usize) {
			Some(HeadlessDescriptor::Array(array)) => array.0[index as usize] = resource,
			_ => panic!("{} binding {} is not a table binding", set.id, binding),
		}
		self.state.lock().calls.push(HeadlessCall::WriteSlot {
			set: set.id,
			binding,
			index,
			resource,
		});
	}
}

impl Debug for Headless {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("Headless")
			.field("memory_budget", &self.memory_budget)
			.field("memory_used", &state.memory_used)
			.field("live_objects", &state.live_objects)
			.finish()
	}
}

#[derive(Debug)]
pub struct HeadlessBuffer {
	pub id: NativeId,
	pub size: u64,
}

#[derive(Debug)]
pub struct HeadlessTexture {
	pub id: NativeId,
	pub size: u64,
}

#[derive(Debug)]
pub struct HeadlessSampler {
	pub id: NativeId,
}

#[derive(Debug)]
pub struct HeadlessShaderModule {
	pub id: NativeId,
	pub stage: ShaderStage,
}

#[derive(Debug)]
pub struct HeadlessBindingSetLayout {
	pub id: NativeId,
	pub entries: SmallVec<[BindingType; 8]>,
}

/// The simulated descriptors of one binding.
#[derive(Debug)]
pub enum HeadlessDescriptor {
	Single(NativeId),
	Array(SlotArray<Option<NativeId>>),
}

#[derive(Debug)]
pub struct HeadlessBindingSet {
	pub id: NativeId,
	pub descriptors: SmallVec<[HeadlessDescriptor; 8]>,
}

impl HeadlessBindingSet {
	/// The native object a shader would observe at `binding` and array element `index`.
	pub fn array_element(&self, binding: u32, index: u32) -> Option<NativeId> {
		match self.descriptors.get(binding as usize)? {
			HeadlessDescriptor::Single(id) => (index == 0).then_some(*id),
			HeadlessDescriptor::Array(array) => array.get(index).copied().flatten(),
		}
	}
}

#[derive(Debug)]
pub struct HeadlessPipeline {
	pub id: NativeId,
	pub layouts: SmallVec<[NativeId; 4]>,
}

#[derive(Debug)]
pub struct HeadlessTable {
	pub id: NativeId,
	pub capacity: u32,
}

#[derive(Error)]
pub enum HeadlessCreateError {
	#[error("Memory budget must not be zero")]
	ZeroMemoryBudget,
}

impl Debug for HeadlessCreateError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self, f)
	}
}

#[derive(Error, Clone, Eq, PartialEq)]
pub enum HeadlessAllocationError {
	#[error("Out of device memory: requested {requested} bytes, but only {available} bytes are available")]
	OutOfDeviceMemory { requested: u64, available: u64 },
}

impl Debug for HeadlessAllocationError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self, f)
	}
}

unsafe impl Platform for Headless {
	type PlatformCreateInfo = HeadlessCreateInfo;
	type PlatformCreateError = HeadlessCreateError;
	type AllocationError = HeadlessAllocationError;
	type Buffer = HeadlessBuffer;
	type Texture = HeadlessTexture;
	type Sampler = HeadlessSampler;
	type ShaderModule = HeadlessShaderModule;
	type BindingSetLayout = HeadlessBindingSetLayout;
	type BindingSet = HeadlessBindingSet;
	type GraphicsPipeline = HeadlessPipeline;
	type ComputePipeline = HeadlessPipeline;
	type TextureTable = HeadlessTable;
	type SamplerTable = HeadlessTable;

	unsafe fn create_platform(create_info: Self::PlatformCreateInfo) -> Result<Self, Self::PlatformCreateError> {
		if create_info.memory_budget == 0 {
			return Err(HeadlessCreateError::ZeroMemoryBudget);
		}
		Ok(Self {
			memory_budget: create_info.memory_budget,
			limits: create_info.limits,
			next_id: AtomicU64::new(1),
			state: Mutex::new(HeadlessState::default()),
		})
	}

	fn limits(&self) -> DeviceLimits {
		self.limits
	}

	unsafe fn create_buffer(&self, create_info: &BufferCreateInfo) -> Result<Self::Buffer, Self::AllocationError> {
		let id = self.create(ResourceKind::Buffer, create_info.name, create_info.size)?;
		Ok(HeadlessBuffer {
			id,
			size: create_info.size,
		})
	}

	unsafe fn create_texture(&self, create_info: &TextureCreateInfo) -> Result<Self::Texture, Self::AllocationError> {
		let size = create_info.size_in_bytes();
		let id = self.create(ResourceKind::Texture, create_info.name, size)?;
		Ok(HeadlessTexture { id, size })
	}

	unsafe fn create_sampler(&self, create_info: &SamplerCreateInfo) -> Result<Self::Sampler, Self::AllocationError> {
		let id = self.create(ResourceKind::Sampler, create_info.name, 0)?;
		Ok(HeadlessSampler { id })
	}

	unsafe fn create_shader_module(
		&self,
		create_info: &ShaderModuleCreateInfo,
	) -> Result<Self::ShaderModule, Self::AllocationError> {
		let id = self.create(ResourceKind::ShaderModule, create_info.name, 0)?;
		Ok(HeadlessShaderModule {
			id,
			stage: create_info.stage,
		})
	}

	unsafe fn create_binding_set_layout(
		&self,
		create_info: &BindingSetLayoutCreateInfo,
	) -> Result<Self::BindingSetLayout, Self::AllocationError> {
		let id = self.create(ResourceKind::BindingSetLayout, create_info.name, 0)?;
		Ok(HeadlessBindingSetLayout {
			id,
			entries: create_info.entries.iter().map(|entry| entry.ty).collect(),
		})
	}

	unsafe fn create_binding_set(
		&self,
		layout: &Self::BindingSetLayout,
		create_info: &BindingSetCreateInfo,
		bindings: &[NativeBinding<'_, Self>],
	) -> Result<Self::BindingSet, Self::AllocationError> {
		let descriptors = bindings
			.iter()
			.zip(layout.entries.iter())
			.map(|(binding, ty)| match binding {
				NativeBinding::UniformBuffer(buffer) | NativeBinding::StorageBuffer(buffer) => {
					HeadlessDescriptor::Single(buffer.id)
				}
				NativeBinding::SampledTexture(texture) | NativeBinding::StorageTexture(texture) => {
					HeadlessDescriptor::Single(texture.id)
				}
				NativeBinding::Sampler(sampler) => HeadlessDescriptor::Single(sampler.id),
				NativeBinding::TextureTable(_) | NativeBinding::SamplerTable(_) => {
					HeadlessDescriptor::Array(SlotArray::new(ty.descriptor_count()))
				}
			})
			.collect();
		let id = self.create(ResourceKind::BindingSet, create_info.name, 0)?;
		Ok(HeadlessBindingSet { id, descriptors })
	}

	unsafe fn create_graphics_pipeline(
		&self,
		create_info: &GraphicsPipelineCreateInfo,
		_vertex: &Self::ShaderModule,
		_fragment: Option<&Self::ShaderModule>,
		layouts: &[&Self::BindingSetLayout],
	) -> Result<Self::GraphicsPipeline, Self::AllocationError> {
		let id = self.create(ResourceKind::GraphicsPipeline, create_info.name, 0)?;
		Ok(HeadlessPipeline {
			id,
			layouts: layouts.iter().map(|layout| layout.id).collect(),
		})
	}

	unsafe fn create_compute_pipeline(
		&self,
		create_info: &ComputePipelineCreateInfo,
		_shader: &Self::ShaderModule,
		layouts: &[&Self::BindingSetLayout],
	) -> Result<Self::ComputePipeline, Self::AllocationError> {
		let id = self.create(ResourceKind::ComputePipeline, create_info.name, 0)?;
		Ok(HeadlessPipeline {
			id,
			layouts: layouts.iter().map(|layout| layout.id).collect(),
		})
	}

	unsafe fn create_texture_table(
		&self,
		create_info: &BindlessTableCreateInfo,
	) -> Result<Self::TextureTable, Self::AllocationError> {
		let id = self.create(ResourceKind::TextureTable, create_info.name, 0)?;
		Ok(HeadlessTable {
			id,
			capacity: create_info.capacity.max(),
		})
	}

	unsafe fn create_sampler_table(
		&self,
		create_info: &BindlessTableCreateInfo,
	) -> Result<Self::SamplerTable, Self::AllocationError> {
		let id = self.create(ResourceKind::SamplerTable, create_info.name, 0)?;
		Ok(HeadlessTable {
			id,
			capacity: create_info.capacity.max(),
		})
	}

	unsafe fn write_texture_table_slot(
		&self,
		set: &mut Self::BindingSet,
		binding: u32,
		index: u32,
		texture: Option<&Self::Texture>,
	) {
		self.write_slot(set, binding, index, texture.map(|t| t.id));
	}

	unsafe fn write_sampler_table_slot(
		&self,
		set: &mut Self::BindingSet,
		binding: u32,
		index: u32,
		sampler: Option<&Self::Sampler>,
	) {
		self.write_slot(set, binding, index, sampler.map(|s| s.id));
	}

	unsafe fn destroy_buffer(&self, buffer: Self::Buffer) {
		self.destroy(ResourceKind::Buffer, buffer.id, buffer.size);
	}

	unsafe fn destroy_texture(&self, texture: Self::Texture) {
		self.destroy(ResourceKind::Texture, texture.id, texture.size);
	}

	unsafe fn destroy_sampler(&self, sampler: Self::Sampler) {
		self.destroy(ResourceKind::Sampler, sampler.id, 0);
	}

	unsafe fn destroy_shader_module(&self, shader_module: Self::ShaderModule) {
		self.destroy(ResourceKind::ShaderModule, shader_module.id, 0);
	}

	unsafe fn destroy_binding_set_layout(&self, layout: Self::BindingSetLayout) {
		self.destroy(ResourceKind::BindingSetLayout, layout.id, 0);
	}

	unsafe fn destroy_binding_set(&self, set: Self::BindingSet) {
		self.destroy(ResourceKind::BindingSet, set.id, 0);
	}

	unsafe fn destroy_graphics_pipeline(&self, pipeline: Self::GraphicsPipeline) {
		self.destroy(ResourceKind::GraphicsPipeline, pipeline.id, 0);
	}

	unsafe fn destroy_compute_pipeline(&self, pipeline: Self::ComputePipeline) {
		self.destroy(ResourceKind::ComputePipeline, pipeline.id, 0);
	}

	unsafe fn destroy_texture_table(&self, table: Self::TextureTable) {
		self.destroy(ResourceKind::TextureTable, table.id, 0);
	}

	unsafe fn destroy_sampler_table(&self, table: Self::SamplerTable) {
		self.destroy(ResourceKind::SamplerTable, table.id, 0);
	}
}

use crate::backing::id::{DeviceId, ResourceId};
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Every kind of resource a [`Device`](crate::device::Device) can create.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum ResourceKind {
	Buffer,
	Texture,
	Sampler,
	ShaderModule,
	BindingSetLayout,
	BindingSet,
	GraphicsPipeline,
	ComputePipeline,
	TextureTable,
	SamplerTable,
}

impl ResourceKind {
	pub const ALL: [ResourceKind; 10] = [
		ResourceKind::Buffer,
		ResourceKind::Texture,
		ResourceKind::Sampler,
		ResourceKind::ShaderModule,
		ResourceKind::BindingSetLayout,
		ResourceKind::BindingSet,
		ResourceKind::GraphicsPipeline,
		ResourceKind::ComputePipeline,
		ResourceKind::TextureTable,
		ResourceKind::SamplerTable,
	];

	pub const fn name(&self) -> &'static str {
		match self {
			ResourceKind::Buffer => "Buffer",
			ResourceKind::Texture => "Texture",
			ResourceKind::Sampler => "Sampler",
			ResourceKind::ShaderModule => "ShaderModule",
			ResourceKind::BindingSetLayout => "BindingSetLayout",
			ResourceKind::BindingSet => "BindingSet",
			ResourceKind::GraphicsPipeline => "GraphicsPipeline",
			ResourceKind::ComputePipeline => "ComputePipeline",
			ResourceKind::TextureTable => "TextureTable",
			ResourceKind::SamplerTable => "SamplerTable",
		}
	}
}

impl Display for ResourceKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Type level marker of a [`ResourceKind`], used as the generic of [`Handle`].
pub trait Kind: Sized + 'static {
	const KIND: ResourceKind;
}

/// Uninhabited marker types, one per [`ResourceKind`].
pub mod kind {
	use super::{Kind, ResourceKind};

	pub enum Buffer {}
	pub enum Texture {}
	pub enum Sampler {}
	pub enum ShaderModule {}
	pub enum BindingSetLayout {}
	pub enum BindingSet {}
	pub enum GraphicsPipeline {}
	pub enum ComputePipeline {}
	pub enum TextureTable {}
	pub enum SamplerTable {}

	impl Kind for Buffer {
		const KIND: ResourceKind = ResourceKind::Buffer;
	}
	impl Kind for Texture {
		const KIND: ResourceKind = ResourceKind::Texture;
	}
	impl Kind for Sampler {
		const KIND: ResourceKind = ResourceKind::Sampler;
	}
	impl Kind for ShaderModule {
		const KIND: ResourceKind = ResourceKind::ShaderModule;
	}
	impl Kind for BindingSetLayout {
		const KIND: ResourceKind = ResourceKind::BindingSetLayout;
	}
	impl Kind for BindingSet {
		const KIND: ResourceKind = ResourceKind::BindingSet;
	}
	impl Kind for GraphicsPipeline {
		const KIND: ResourceKind = ResourceKind::GraphicsPipeline;
	}
	impl Kind for ComputePipeline {
		const KIND: ResourceKind = ResourceKind::ComputePipeline;
	}
	impl Kind for TextureTable {
		const KIND: ResourceKind = ResourceKind::TextureTable;
	}
	impl Kind for SamplerTable {
		const KIND: ResourceKind = ResourceKind::SamplerTable;
	}
}

/// A small, copyable, backend independent identifier of one resource created by a [`Device`].
///
/// A handle does not own anything, the [`Device`] that created it does. Copies refer to the same resource and compare
/// equal. A handle becomes invalid once the matching `destroy_*` call returns, after which the [`Device`] will
/// refuse it: the slot it points to is versioned, so even a reused slot does not resolve to the new resource.
///
/// [`Device`]: crate::device::Device
pub struct Handle<K: Kind> {
	device: DeviceId,
	id: ResourceId,
	_phantom: PhantomData<fn() -> K>,
}

impl<K: Kind> Handle<K> {
	pub(crate) const fn new(device: DeviceId, id: ResourceId) -> Self {
		Self {
			device,
			id,
			_phantom: PhantomData,
		}
	}

	#[inline]
	pub const fn device(&self) -> DeviceId {
		self.device
	}

	#[inline]
	pub const fn id(&self) -> ResourceId {
		self.id
	}

	#[inline]
	pub const fn kind(&self) -> ResourceKind {
		K::KIND
	}

	#[inline]
	pub const fn erase(&self) -> AnyHandle {
		AnyHandle {
			kind: K::KIND,
			device: self.device,
			id: self.id,
		}
	}
}

impl<K: Kind> Copy for Handle<K> {}

impl<K: Kind> Clone for Handle<K> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<K: Kind> PartialEq for Handle<K> {
	fn eq(&self, other: &Self) -> bool {
		self.device == other.device && self.id == other.id
	}
}

impl<K: Kind> Eq for Handle<K> {}

impl<K: Kind> Hash for Handle<K> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.device.hash(state);
		self.id.hash(state);
	}
}

impl<K: Kind> Debug for Handle<K> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct(K::KIND.name())
			.field("device", &self.device.to_u32())
			.field("index", &self.id.index().to_u32())
			.field("version", &self.id.version().to_u32())
			.finish()
	}
}

impl<K: Kind> From<Handle<K>> for AnyHandle {
	fn from(value: Handle<K>) -> Self {
		value.erase()
	}
}

/// A [`Handle`] with its kind erased into a runtime [`ResourceKind`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct AnyHandle {
	pub kind: ResourceKind,
	pub device: DeviceId,
	pub id: ResourceId,
}

impl AnyHandle {
	/// Recover the typed [`Handle`], if the kinds match.
	pub fn downcast<K: Kind>(&self) -> Option<Handle<K>> {
		(self.kind == K::KIND).then(|| Handle::new(self.device, self.id))
	}
}

pub type BufferHandle = Handle<kind::Buffer>;
pub type TextureHandle = Handle<kind::Texture>;
pub type SamplerHandle = Handle<kind::Sampler>;
pub type ShaderModuleHandle = Handle<kind::ShaderModule>;
pub type BindingSetLayoutHandle = Handle<kind::BindingSetLayout>;
pub type BindingSetHandle = Handle<kind::BindingSet>;
pub type GraphicsPipelineHandle = Handle<kind::GraphicsPipeline>;
pub type ComputePipelineHandle = Handle<kind::ComputePipeline>;
pub type TextureTableHandle = Handle<kind::TextureTable>;
pub type SamplerTableHandle = Handle<kind::SamplerTable>;

use crate::descriptor::{
	AnyHandle, BindingKind, BindingSetLayoutHandle, BindingSetLayoutMeta, BufferHandle, SamplerHandle,
	SamplerTableHandle, TextureHandle, TextureTableHandle, ValidationError,
};
use smallvec::SmallVec;

/// The resource bound to one binding of a binding set.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BindingResource {
	UniformBuffer(BufferHandle),
	StorageBuffer(BufferHandle),
	SampledTexture(TextureHandle),
	StorageTexture(TextureHandle),
	Sampler(SamplerHandle),
	TextureTable(TextureTableHandle),
	SamplerTable(SamplerTableHandle),
}

impl BindingResource {
	pub fn kind(&self) -> BindingKind {
		match self {
			BindingResource::UniformBuffer(_) => BindingKind::UniformBuffer,
			BindingResource::StorageBuffer(_) => BindingKind::StorageBuffer,
			BindingResource::SampledTexture(_) => BindingKind::SampledTexture,
			BindingResource::StorageTexture(_) => BindingKind::StorageTexture,
			BindingResource::Sampler(_) => BindingKind::Sampler,
			BindingResource::TextureTable(_) => BindingKind::TextureTable,
			BindingResource::SamplerTable(_) => BindingKind::SamplerTable,
		}
	}

	pub fn handle(&self) -> AnyHandle {
		match self {
			BindingResource::UniformBuffer(h) | BindingResource::StorageBuffer(h) => h.erase(),
			BindingResource::SampledTexture(h) | BindingResource::StorageTexture(h) => h.erase(),
			BindingResource::Sampler(h) => h.erase(),
			BindingResource::TextureTable(h) => h.erase(),
			BindingResource::SamplerTable(h) => h.erase(),
		}
	}

	pub fn mode(&self) -> BindingMode {
		if self.kind().is_dynamic() {
			BindingMode::Dynamic
		} else {
			BindingMode::Static
		}
	}
}

/// Whether a binding is fixed for the lifetime of its binding set, or follows the contents of a bindless table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BindingMode {
	Static,
	Dynamic,
}

#[derive(Copy, Clone, Debug)]
pub struct BindingSetCreateInfo<'a> {
	pub layout: BindingSetLayoutHandle,
	/// One resource per entry of the layout, in order.
	pub bindings: &'a [BindingResource],
	/// Name of the binding set, for tracking and debugging purposes
	pub name: &'a str,
}

impl BindingSetCreateInfo<'_> {
	/// Verifies the bindings match the entries of `layout` in count and kind. Whether the referenced resources are
	/// alive and suitable is checked by the [`Device`](crate::device::Device).
	pub fn validate_structure(&self, layout: &BindingSetLayoutMeta) -> Result<(), ValidationError> {
		if self.bindings.len() != layout.entries.len() {
			return Err(ValidationError::BindingCountMismatch {
				name: self.name.to_owned(),
				expected: layout.entries.len(),
				actual: self.bindings.len(),
			});
		}
		for (binding, (resource, entry)) in self.bindings.iter().zip(layout.entries.iter()).enumerate() {
			if resource.kind() != entry.ty.kind() {
				return Err(ValidationError::BindingKindMismatch {
					name: self.name.to_owned(),
					binding: binding as u32,
					expected: entry.ty.kind(),
					actual: resource.kind(),
				});
			}
		}
		Ok(())
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindingSetMeta {
	pub layout: BindingSetLayoutHandle,
	pub bindings: SmallVec<[BindingResource; 8]>,
}

impl BindingSetMeta {
	pub fn binding(&self, binding: u32) -> Option<BindingResource> {
		self.bindings.get(binding as usize).copied()
	}

	pub fn mode(&self, binding: u32) -> Option<BindingMode> {
		self.binding(binding).map(|b| b.mode())
	}
}

use crate::descriptor::{DeviceLimits, ResourceKind, ShaderStages, ValidationError};
use smallvec::SmallVec;

/// The kind of resource a binding expects, without any parameters.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BindingKind {
	UniformBuffer,
	StorageBuffer,
	SampledTexture,
	StorageTexture,
	Sampler,
	TextureTable,
	SamplerTable,
}

impl BindingKind {
	/// Table bindings reflect the current contents of their table, all other bindings are fixed at creation.
	pub fn is_dynamic(&self) -> bool {
		matches!(self, BindingKind::TextureTable | BindingKind::SamplerTable)
	}
}

/// The resource a binding expects.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BindingType {
	UniformBuffer,
	StorageBuffer,
	SampledTexture,
	StorageTexture,
	Sampler,
	/// A bindless [`TextureTable`](crate::descriptor::TextureTableHandle) of at most `capacity` slots.
	TextureTable {
		capacity: u32,
	},
	/// A bindless [`SamplerTable`](crate::descriptor::SamplerTableHandle) of at most `capacity` slots.
	SamplerTable {
		capacity: u32,
	},
}

impl BindingType {
	pub fn kind(&self) -> BindingKind {
		match self {
			BindingType::UniformBuffer => BindingKind::UniformBuffer,
			BindingType::StorageBuffer => BindingKind::StorageBuffer,
			BindingType::SampledTexture => BindingKind::SampledTexture,
			BindingType::StorageTexture => BindingKind::StorageTexture,
			BindingType::Sampler => BindingKind::Sampler,
			BindingType::TextureTable { .. } => BindingKind::TextureTable,
			BindingType::SamplerTable { .. } => BindingKind::SamplerTable,
		}
	}

	/// The amount of descriptors this binding consists of.
	pub fn descriptor_count(&self) -> u32 {
		match *self {
			BindingType::TextureTable { capacity } | BindingType::SamplerTable { capacity } => capacity,
			_ => 1,
		}
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BindingLayoutEntry {
	pub ty: BindingType,
	/// The shader stages that may access this binding, must not be empty.
	pub visibility: ShaderStages,
}

/// Describes the bindings of a binding set, the binding number of an entry is its index in `entries`.
#[derive(Copy, Clone, Debug)]
pub struct BindingSetLayoutCreateInfo<'a> {
	pub entries: &'a [BindingLayoutEntry],
	/// Name of the binding set layout, for tracking and debugging purposes
	pub name: &'a str,
}

impl BindingSetLayoutCreateInfo<'_> {
	pub fn validate(&self, limits: &DeviceLimits) -> Result<(), ValidationError> {
		let count = self.entries.len() as u32;
		if count > limits.max_bindings_per_layout {
			return Err(ValidationError::TooManyBindings {
				name: self.name.to_owned(),
				count,
				max: limits.max_bindings_per_layout,
			});
		}
		for (binding, entry) in self.entries.iter().enumerate() {
			if entry.visibility.is_empty() {
				return Err(ValidationError::EmptyVisibility {
					name: self.name.to_owned(),
					binding: binding as u32,
				});
			}
			let table_kind = match entry.ty {
				BindingType::TextureTable { .. } => Some(ResourceKind::TextureTable),
				BindingType::SamplerTable { .. } => Some(ResourceKind::SamplerTable),
				_ => None,
			};
			if let Some(kind) = table_kind {
				let capacity = entry.ty.descriptor_count();
				if capacity == 0 || capacity > limits.max_table_capacity {
					return Err(ValidationError::InvalidTableCapacity {
						kind,
						name: self.name.to_owned(),
						capacity,
						max: limits.max_table_capacity,
					});
				}
			}
		}
		Ok(())
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindingSetLayoutMeta {
	pub entries: SmallVec<[BindingLayoutEntry; 8]>,
}

impl BindingSetLayoutMeta {
	pub fn new(ci: &BindingSetLayoutCreateInfo) -> Self {
		Self {
			entries: SmallVec::from_slice(ci.entries),
		}
	}

	/// Union of all stages any binding is visible to.
	pub fn stages(&self) -> ShaderStages {
		self.entries
			.iter()
			.fold(ShaderStages::empty(), |stages, entry| stages | entry.visibility)
	}
}

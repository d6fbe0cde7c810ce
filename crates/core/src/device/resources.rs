use crate::descriptor::{
	kind, BindingKind, BindingMode, BindingResource, BindingSetCreateInfo, BindingSetHandle, BindingSetLayoutCreateInfo,
	BindingSetLayoutHandle, BindingSetLayoutMeta, BindingSetMeta, BufferCreateInfo, BufferHandle, BufferMeta,
	BufferUsage, ResourceKind, SamplerCreateInfo, SamplerHandle, ShaderModuleCreateInfo, ShaderModuleHandle,
	ShaderModuleMeta, TextureCreateInfo, TextureHandle, TextureMeta, TextureUsage, ValidationError,
};
use crate::device::{CreateError, Device};
use crate::platform::{NativeBinding, Platform};
use smallvec::SmallVec;

impl<P: Platform> Device<P> {
	pub fn create_buffer(&mut self, create_info: &BufferCreateInfo) -> Result<BufferHandle, CreateError<P>> {
		create_info.validate(&self.limits)?;
		let meta = BufferMeta {
			size: create_info.size,
			usage: create_info.usage,
		};
		self.create_resource(create_info.name, meta, |platform| unsafe {
			platform.create_buffer(create_info)
		})
	}

	/// # Panics
	/// If `buffer` was already destroyed, belongs to another device or is still bound to a binding set.
	#[track_caller]
	pub fn destroy_buffer(&mut self, buffer: BufferHandle) {
		self.retire(buffer);
	}

	pub fn create_texture(&mut self, create_info: &TextureCreateInfo) -> Result<TextureHandle, CreateError<P>> {
		create_info.validate(&self.limits)?;
		self.create_resource(create_info.name, TextureMeta::from(create_info), |platform| unsafe {
			platform.create_texture(create_info)
		})
	}

	/// # Panics
	/// If `texture` was already destroyed, belongs to another device or is still bound to a binding set or table.
	#[track_caller]
	pub fn destroy_texture(&mut self, texture: TextureHandle) {
		self.retire(texture);
	}

	pub fn create_sampler(&mut self, create_info: &SamplerCreateInfo) -> Result<SamplerHandle, CreateError<P>> {
		create_info.validate()?;
		self.create_resource(create_info.name, (), |platform| unsafe {
			platform.create_sampler(create_info)
		})
	}

	/// # Panics
	/// If `sampler` was already destroyed, belongs to another device or is still bound to a binding set or table.
	#[track_caller]
	pub fn destroy_sampler(&mut self, sampler: SamplerHandle) {
		self.retire(sampler);
	}

	pub fn create_shader_module(
		&mut self,
		create_info: &ShaderModuleCreateInfo,
	) -> Result<ShaderModuleHandle, CreateError<P>> {
		create_info.validate()?;
		let meta = ShaderModuleMeta {
			stage: create_info.stage,
			entry_point: create_info.entry_point.to_owned(),
		};
		self.create_resource(create_info.name, meta, |platform| unsafe {
			platform.create_shader_module(create_info)
		})
	}

	/// Pipelines don't keep their shader modules alive, a shader module may be destroyed right after creating the
	/// pipelines using it.
	#[track_caller]
	pub fn destroy_shader_module(&mut self, shader_module: ShaderModuleHandle) {
		self.retire(shader_module);
	}

	pub fn create_binding_set_layout(
		&mut self,
		create_info: &BindingSetLayoutCreateInfo,
	) -> Result<BindingSetLayoutHandle, CreateError<P>> {
		create_info.validate(&self.limits)?;
		self.create_resource(create_info.name, BindingSetLayoutMeta::new(create_info), |platform| unsafe {
			platform.create_binding_set_layout(create_info)
		})
	}

	/// # Panics
	/// If `layout` was already destroyed, belongs to another device or any binding set or pipeline created with it is
	/// still alive.
	#[track_caller]
	pub fn destroy_binding_set_layout(&mut self, layout: BindingSetLayoutHandle) {
		self.retire(layout);
	}

	/// Create a binding set conforming to `create_info.layout`. Table bindings are dynamic: the binding set observes
	/// the current contents of the table, including any later bind or unbind.
	pub fn create_binding_set(&mut self, create_info: &BindingSetCreateInfo) -> Result<BindingSetHandle, CreateError<P>> {
		let name = create_info.name;
		let layout = self.lookup(create_info.layout, name)?;
		create_info.validate_structure(&layout.meta)?;

		let missing_usage = |binding: usize, kind: ResourceKind, resource: &str, expected: BindingKind| {
			ValidationError::MissingUsage {
				name: name.to_owned(),
				binding: binding as u32,
				kind,
				resource: resource.to_owned(),
				expected,
			}
		};
		let table_too_large = |binding: usize, capacity: u32, max: u32| ValidationError::TableCapacityExceedsLayout {
			name: name.to_owned(),
			binding: binding as u32,
			capacity,
			max,
		};

		let mut natives = SmallVec::<[NativeBinding<P>; 8]>::with_capacity(create_info.bindings.len());
		for (binding, (resource, entry)) in create_info.bindings.iter().zip(layout.meta.entries.iter()).enumerate() {
			let expected = resource.kind();
			let native = match *resource {
				BindingResource::UniformBuffer(handle) | BindingResource::StorageBuffer(handle) => {
					let buffer = self.lookup(handle, name)?;
					let required = match expected {
						BindingKind::UniformBuffer => BufferUsage::UNIFORM_BUFFER,
						_ => BufferUsage::STORAGE_BUFFER,
					};
					if !buffer.meta.usage.contains(required) {
						return Err(missing_usage(binding, ResourceKind::Buffer, &buffer.name, expected).into());
					}
					match expected {
						BindingKind::UniformBuffer => NativeBinding::UniformBuffer(&buffer.object),
						_ => NativeBinding::StorageBuffer(&buffer.object),
					}
				}
				BindingResource::SampledTexture(handle) | BindingResource::StorageTexture(handle) => {
					let texture = self.lookup(handle, name)?;
					let required = match expected {
						BindingKind::SampledTexture => TextureUsage::SAMPLED,
						_ => TextureUsage::STORAGE,
					};
					if !texture.meta.usage.contains(required) {
						return Err(missing_usage(binding, ResourceKind::Texture, &texture.name, expected).into());
					}
					match expected {
						BindingKind::SampledTexture => NativeBinding::SampledTexture(&texture.object),
						_ => NativeBinding::StorageTexture(&texture.object),
					}
				}
				BindingResource::Sampler(handle) => NativeBinding::Sampler(&self.lookup(handle, name)?.object),
				BindingResource::TextureTable(handle) => {
					let table = self.lookup(handle, name)?;
					let capacity = table.meta.max_capacity();
					if capacity > entry.ty.descriptor_count() {
						return Err(table_too_large(binding, capacity, entry.ty.descriptor_count()).into());
					}
					NativeBinding::TextureTable(&table.object)
				}
				BindingResource::SamplerTable(handle) => {
					let table = self.lookup(handle, name)?;
					let capacity = table.meta.max_capacity();
					if capacity > entry.ty.descriptor_count() {
						return Err(table_too_large(binding, capacity, entry.ty.descriptor_count()).into());
					}
					NativeBinding::SamplerTable(&table.object)
				}
			};
			natives.push(native);
		}

		self.check_capacity::<kind::BindingSet>()?;
		let object = unsafe { self.platform.create_binding_set(&layout.object, create_info, &natives) }
			.map_err(CreateError::Platform)?;
		drop(natives);

		let meta = BindingSetMeta {
			layout: create_info.layout,
			bindings: SmallVec::from_slice(create_info.bindings),
		};
		let set = self.insert(object, meta, name);
		self.acquire(create_info.layout);
		for (binding, resource) in create_info.bindings.iter().enumerate() {
			match *resource {
				BindingResource::UniformBuffer(handle) | BindingResource::StorageBuffer(handle) => self.acquire(handle),
				BindingResource::SampledTexture(handle) | BindingResource::StorageTexture(handle) => {
					self.acquire(handle)
				}
				BindingResource::Sampler(handle) => self.acquire(handle),
				BindingResource::TextureTable(handle) => self.attach_table(handle, set, binding as u32),
				BindingResource::SamplerTable(handle) => self.attach_table(handle, set, binding as u32),
			}
		}
		Ok(set)
	}

	/// # Panics
	/// If `set` was already destroyed or belongs to another device.
	#[track_caller]
	pub fn destroy_binding_set(&mut self, set: BindingSetHandle) {
		let meta = self.retire(set);
		self.release(meta.layout);
		for (binding, resource) in meta.bindings.iter().enumerate() {
			match *resource {
				BindingResource::UniformBuffer(handle) | BindingResource::StorageBuffer(handle) => self.release(handle),
				BindingResource::SampledTexture(handle) | BindingResource::StorageTexture(handle) => {
					self.release(handle)
				}
				BindingResource::Sampler(handle) => self.release(handle),
				BindingResource::TextureTable(handle) => self.detach_table(handle, set, binding as u32),
				BindingResource::SamplerTable(handle) => self.detach_table(handle, set, binding as u32),
			}
		}
	}

	/// Whether `binding` of `set` is fixed or follows a table, None if `binding` does not exist.
	#[track_caller]
	pub fn binding_mode(&self, set: BindingSetHandle, binding: u32) -> Option<BindingMode> {
		self.entry(set).meta.mode(binding)
	}
}

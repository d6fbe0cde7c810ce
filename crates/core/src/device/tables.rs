use crate::descriptor::{
	kind, AnyHandle, Kind, BindingResource, BindingSetHandle, BindlessTableCreateInfo, Handle, ResourceKind, SamplerHandle,
	SamplerTableHandle, TableError, TableState, TextureHandle, TextureMeta, TextureTableHandle, TextureUsage,
};
use crate::device::{CreateError, Device, DeviceResource, Pools};
use crate::platform::Platform;

/// A bindless table kind, holding slots of [`Self::Element`] resources.
pub trait BindlessTableKind<P: Platform>: DeviceResource<P> {
	type Element: DeviceResource<P>;

	fn state(meta: &Self::Meta) -> &TableState<Self::Element>;

	fn state_mut(meta: &mut Self::Meta) -> &mut TableState<Self::Element>;

	/// Whether an element may be bound to a table of this kind.
	fn is_bindable(element: &<Self::Element as DeviceResource<P>>::Meta) -> bool;

	/// Write slot `index` of the table bound at `binding` of `set` on the platform.
	///
	/// # Safety
	/// `set` must be alive and reference a table of this kind at `binding`, `element` must be alive.
	unsafe fn write_slot(
		platform: &P,
		pools: &mut Pools<P>,
		set: BindingSetHandle,
		binding: u32,
		index: u32,
		element: Option<Handle<Self::Element>>,
	);
}

impl<P: Platform> BindlessTableKind<P> for kind::TextureTable {
	type Element = kind::Texture;

	#[inline]
	fn state(meta: &Self::Meta) -> &TableState<Self::Element> {
		meta
	}

	#[inline]
	fn state_mut(meta: &mut Self::Meta) -> &mut TableState<Self::Element> {
		meta
	}

	#[inline]
	fn is_bindable(element: &TextureMeta) -> bool {
		element.usage.contains(TextureUsage::SAMPLED)
	}

	unsafe fn write_slot(
		platform: &P,
		pools: &mut Pools<P>,
		set: BindingSetHandle,
		binding: u32,
		index: u32,
		element: Option<Handle<Self::Element>>,
	) {
		let Pools {
			textures, binding_sets, ..
		} = pools;
		let texture = element.and_then(|texture| textures.get(texture.id())).map(|entry| &entry.object);
		if let Some(set) = binding_sets.get_mut(set.id()) {
			unsafe { platform.write_texture_table_slot(&mut set.object, binding, index, texture) };
		}
	}
}

impl<P: Platform> BindlessTableKind<P> for kind::SamplerTable {
	type Element = kind::Sampler;

	#[inline]
	fn state(meta: &Self::Meta) -> &TableState<Self::Element> {
		meta
	}

	#[inline]
	fn state_mut(meta: &mut Self::Meta) -> &mut TableState<Self::Element> {
		meta
	}

	#[inline]
	fn is_bindable(_: &()) -> bool {
		true
	}

	unsafe fn write_slot(
		platform: &P,
		pools: &mut Pools<P>,
		set: BindingSetHandle,
		binding: u32,
		index: u32,
		element: Option<Handle<Self::Element>>,
	) {
		let Pools {
			samplers, binding_sets, ..
		} = pools;
		let sampler = element.and_then(|sampler| samplers.get(sampler.id())).map(|entry| &entry.object);
		if let Some(set) = binding_sets.get_mut(set.id()) {
			unsafe { platform.write_sampler_table_slot(&mut set.object, binding, index, sampler) };
		}
	}
}

impl<P: Platform> Device<P> {
	pub fn create_texture_table(
		&mut self,
		create_info: &BindlessTableCreateInfo,
	) -> Result<TextureTableHandle, CreateError<P>> {
		create_info.validate(ResourceKind::TextureTable, &self.limits)?;
		self.create_resource(create_info.name, TableState::new(create_info.capacity), |platform| unsafe {
			platform.create_texture_table(create_info)
		})
	}

	/// Bind `texture` to slot `index` of `table`, replacing and returning the texture previously bound there. Every
	/// binding set referencing `table` observes `texture` at `index` once this returns.
	///
	/// Fails if `index` is out of range or `texture` was not created with [`TextureUsage::SAMPLED`], leaving the slot
	/// untouched.
	///
	/// # Panics
	/// If `table` or `texture` was already destroyed or belongs to another device.
	#[track_caller]
	pub fn bind_texture(
		&mut self,
		table: TextureTableHandle,
		texture: TextureHandle,
		index: u32,
	) -> Result<Option<TextureHandle>, TableError> {
		self.write_table_slot(table, index, Some(texture))
	}

	/// Clear slot `index` of `table`, returning the texture previously bound there.
	#[track_caller]
	pub fn unbind_texture(&mut self, table: TextureTableHandle, index: u32) -> Result<Option<TextureHandle>, TableError> {
		self.write_table_slot(table, index, None)
	}

	#[track_caller]
	pub fn texture_table_slot(&self, table: TextureTableHandle, index: u32) -> Option<TextureHandle> {
		self.entry(table).meta.get(index)
	}

	/// The amount of currently addressable slots of `table`.
	#[track_caller]
	pub fn texture_table_capacity(&self, table: TextureTableHandle) -> u32 {
		self.entry(table).meta.capacity()
	}

	/// Destroy `table`, releasing all textures bound to it.
	///
	/// # Panics
	/// If `table` was already destroyed or belongs to another device.
	#[track_caller]
	pub fn destroy_texture_table(&mut self, table: TextureTableHandle) -> Result<(), TableError> {
		self.destroy_table(table)
	}

	pub fn create_sampler_table(
		&mut self,
		create_info: &BindlessTableCreateInfo,
	) -> Result<SamplerTableHandle, CreateError<P>> {
		create_info.validate(ResourceKind::SamplerTable, &self.limits)?;
		self.create_resource(create_info.name, TableState::new(create_info.capacity), |platform| unsafe {
			platform.create_sampler_table(create_info)
		})
	}

	/// Bind `sampler` to slot `index` of `table`, replacing and returning the sampler previously bound there. Every
	/// binding set referencing `table` observes `sampler` at `index` once this returns.
	///
	/// # Panics
	/// If `table` or `sampler` was already destroyed or belongs to another device.
	#[track_caller]
	pub fn bind_sampler(
		&mut self,
		table: SamplerTableHandle,
		sampler: SamplerHandle,
		index: u32,
	) -> Result<Option<SamplerHandle>, TableError> {
		self.write_table_slot(table, index, Some(sampler))
	}

	/// Clear slot `index` of `table`, returning the sampler previously bound there.
	#[track_caller]
	pub fn unbind_sampler(&mut self, table: SamplerTableHandle, index: u32) -> Result<Option<SamplerHandle>, TableError> {
		self.write_table_slot(table, index, None)
	}

	#[track_caller]
	pub fn sampler_table_slot(&self, table: SamplerTableHandle, index: u32) -> Option<SamplerHandle> {
		self.entry(table).meta.get(index)
	}

	#[track_caller]
	pub fn sampler_table_capacity(&self, table: SamplerTableHandle) -> u32 {
		self.entry(table).meta.capacity()
	}

	/// Destroy `table`, releasing all samplers bound to it.
	///
	/// # Panics
	/// If `table` was already destroyed or belongs to another device.
	#[track_caller]
	pub fn destroy_sampler_table(&mut self, table: SamplerTableHandle) -> Result<(), TableError> {
		self.destroy_table(table)
	}

	/// The resource `set` observes at slot `index` of the table bound at `binding`. None if the slot is empty or
	/// `binding` is not a table binding.
	#[track_caller]
	pub fn resolve_table_slot(&self, set: BindingSetHandle, binding: u32, index: u32) -> Option<AnyHandle> {
		match self.entry(set).meta.binding(binding)? {
			BindingResource::TextureTable(table) => self.texture_table_slot(table, index).map(|h| h.erase()),
			BindingResource::SamplerTable(table) => self.sampler_table_slot(table, index).map(|h| h.erase()),
			_ => None,
		}
	}

	/// Replace a slot and propagate the change to every dependent binding set. The index and the element's usage are
	/// checked before anything is modified, a failed check leaves all slots unchanged.
	#[track_caller]
	fn write_table_slot<T: BindlessTableKind<P>>(
		&mut self,
		table: Handle<T>,
		index: u32,
		element: Option<Handle<T::Element>>,
	) -> Result<Option<Handle<T::Element>>, TableError> {
		profiling::function_scope!();
		let entry = self.entry(table);
		let slot = T::state(&entry.meta)
			.check_index(index)
			.map_err(|capacity| TableError::OutOfRange {
				kind: T::KIND,
				name: entry.name.clone(),
				index,
				capacity,
			})?;
		if let Some(element) = element {
			let element_entry = self.entry(element);
			if !T::is_bindable(&element_entry.meta) {
				return Err(TableError::MissingUsage {
					kind: T::KIND,
					name: entry.name.clone(),
					element_kind: T::Element::KIND,
					element: element_entry.name.clone(),
				});
			}
			self.acquire(element);
		}

		let entry = self.entry_mut(table);
		let state = T::state_mut(&mut entry.meta);
		let previous = state.replace(slot, element);
		let dependents = state.dependents().to_vec();
		if let Some(previous) = previous {
			self.release(previous);
		}
		for (set, binding) in dependents {
			unsafe { T::write_slot(&self.platform, &mut self.pools, set, binding, index, element) };
		}
		log::trace!(
			"{}: {} \"{}\" slot {} = {:?}",
			self.id,
			T::KIND,
			self.entry(table).name,
			index,
			element
		);
		Ok(previous)
	}

	#[track_caller]
	fn destroy_table<T: BindlessTableKind<P>>(&mut self, table: Handle<T>) -> Result<(), TableError> {
		let entry = self.entry(table);
		let dependents = T::state(&entry.meta).dependents().len();
		if dependents != 0 {
			return Err(TableError::TableInUse {
				kind: T::KIND,
				name: entry.name.clone(),
				dependents,
			});
		}
		let mut meta = self.retire(table);
		for element in T::state_mut(&mut meta).clear() {
			self.release(element);
		}
		Ok(())
	}

	/// Register `set` as dependent of `table` and write all currently occupied slots into it.
	pub(super) fn attach_table<T: BindlessTableKind<P>>(&mut self, table: Handle<T>, set: BindingSetHandle, binding: u32) {
		let state = T::state_mut(&mut self.entry_mut(table).meta);
		state.add_dependent(set, binding);
		let occupied = state.iter().collect::<Vec<_>>();
		for (index, element) in occupied {
			unsafe { T::write_slot(&self.platform, &mut self.pools, set, binding, index.to_u32(), Some(element)) };
		}
	}

	pub(super) fn detach_table<T: BindlessTableKind<P>>(&mut self, table: Handle<T>, set: BindingSetHandle, binding: u32) {
		T::state_mut(&mut self.entry_mut(table).meta).remove_dependent(set, binding);
	}
}

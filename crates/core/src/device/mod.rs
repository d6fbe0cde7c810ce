mod error;
mod leak;
mod resources;
mod tables;

pub use error::*;
pub use leak::*;
pub use tables::*;

use crate::backing::arena::Arena;
use crate::backing::id::DeviceId;
#[cfg(feature = "resource-tracking")]
use crate::backing::resource_table::ResourceTable;
use crate::descriptor::{
	kind, BindingSetLayoutMeta, BindingSetMeta, BufferMeta, DeviceLimits, Handle, Kind, ShaderModuleMeta,
	TableState, TextureMeta, ValidationError,
};
use crate::pipeline::PipelineMeta;
use crate::platform::Platform;
use std::fmt::{Debug, Formatter};

/// A live resource: the platform's implementation object, what the device remembers about it and how many other
/// resources currently depend on it.
pub struct Entry<O, M> {
	pub object: O,
	pub meta: M,
	pub name: String,
	/// Binding sets, table slots and pipelines referencing this resource. It can't be destroyed while non-zero.
	pub users: u32,
}

/// A [`Kind`] of resource a [`Device`] stores for the [`Platform`] `P`.
pub trait DeviceResource<P: Platform>: Kind {
	type Object: 'static + Send + Sync;
	type Meta: 'static + Send + Sync;

	fn pool(pools: &Pools<P>) -> &Arena<Entry<Self::Object, Self::Meta>>;

	fn pool_mut(pools: &mut Pools<P>) -> &mut Arena<Entry<Self::Object, Self::Meta>>;

	/// # Safety
	/// `object` must have been created by `platform` and must not be referenced by any other live native object.
	unsafe fn destroy(platform: &P, object: Self::Object);
}

pub struct Pools<P: Platform> {
	buffers: Arena<Entry<P::Buffer, BufferMeta>>,
	textures: Arena<Entry<P::Texture, TextureMeta>>,
	samplers: Arena<Entry<P::Sampler, ()>>,
	shader_modules: Arena<Entry<P::ShaderModule, ShaderModuleMeta>>,
	binding_set_layouts: Arena<Entry<P::BindingSetLayout, BindingSetLayoutMeta>>,
	binding_sets: Arena<Entry<P::BindingSet, BindingSetMeta>>,
	graphics_pipelines: Arena<Entry<P::GraphicsPipeline, PipelineMeta>>,
	compute_pipelines: Arena<Entry<P::ComputePipeline, PipelineMeta>>,
	texture_tables: Arena<Entry<P::TextureTable, TableState<kind::Texture>>>,
	sampler_tables: Arena<Entry<P::SamplerTable, TableState<kind::Sampler>>>,
}

impl<P: Platform> Pools<P> {
	fn new() -> Self {
		Self {
			buffers: Arena::new(),
			textures: Arena::new(),
			samplers: Arena::new(),
			shader_modules: Arena::new(),
			binding_set_layouts: Arena::new(),
			binding_sets: Arena::new(),
			graphics_pipelines: Arena::new(),
			compute_pipelines: Arena::new(),
			texture_tables: Arena::new(),
			sampler_tables: Arena::new(),
		}
	}

	fn len(&self) -> usize {
		self.buffers.len()
			+ self.textures.len()
			+ self.samplers.len()
			+ self.shader_modules.len()
			+ self.binding_set_layouts.len()
			+ self.binding_sets.len()
			+ self.graphics_pipelines.len()
			+ self.compute_pipelines.len()
			+ self.texture_tables.len()
			+ self.sampler_tables.len()
	}
}

macro_rules! device_resource {
	($kind:ident, $pool:ident, $meta:ty, $destroy:ident) => {
		impl<P: Platform> DeviceResource<P> for kind::$kind {
			type Object = P::$kind;
			type Meta = $meta;

			#[inline]
			fn pool(pools: &Pools<P>) -> &Arena<Entry<Self::Object, Self::Meta>> {
				&pools.$pool
			}

			#[inline]
			fn pool_mut(pools: &mut Pools<P>) -> &mut Arena<Entry<Self::Object, Self::Meta>> {
				&mut pools.$pool
			}

			unsafe fn destroy(platform: &P, object: Self::Object) {
				unsafe { platform.$destroy(object) }
			}
		}
	};
}

device_resource!(Buffer, buffers, BufferMeta, destroy_buffer);
device_resource!(Texture, textures, TextureMeta, destroy_texture);
device_resource!(Sampler, samplers, (), destroy_sampler);
device_resource!(ShaderModule, shader_modules, ShaderModuleMeta, destroy_shader_module);
device_resource!(
	BindingSetLayout,
	binding_set_layouts,
	BindingSetLayoutMeta,
	destroy_binding_set_layout
);
device_resource!(BindingSet, binding_sets, BindingSetMeta, destroy_binding_set);
device_resource!(GraphicsPipeline, graphics_pipelines, PipelineMeta, destroy_graphics_pipeline);
device_resource!(ComputePipeline, compute_pipelines, PipelineMeta, destroy_compute_pipeline);
device_resource!(
	TextureTable,
	texture_tables,
	TableState<kind::Texture>,
	destroy_texture_table
);
device_resource!(
	SamplerTable,
	sampler_tables,
	TableState<kind::Sampler>,
	destroy_sampler_table
);

/// Configuration of a [`Device`], resolved once at creation.
#[derive(Copy, Clone, Debug)]
pub struct DeviceCreateInfo<'a> {
	/// Track every live handle in a resource table, to detect double destroys, foreign handles and leaks. Requires
	/// the `resource-tracking` feature, otherwise it is ignored with a warning.
	pub debug_tracking: bool,
	/// The limits to validate against, must be within the limits supported by the platform. Defaults to
	/// [`DeviceLimits::reasonable_defaults`].
	pub limits: Option<DeviceLimits>,
	/// Name of the device, for tracking and debugging purposes
	pub name: &'a str,
}

impl Default for DeviceCreateInfo<'_> {
	fn default() -> Self {
		Self {
			debug_tracking: cfg!(debug_assertions),
			limits: None,
			name: "",
		}
	}
}

/// The sole authority to create and destroy resources on a [`Platform`].
///
/// Creating, destroying and modifying resources requires `&mut self`, so all resource management of a device is
/// serialized by the borrow checker. Wrap the device in a lock if multiple threads need to manage resources.
pub struct Device<P: Platform> {
	id: DeviceId,
	name: String,
	limits: DeviceLimits,
	platform: P,
	pools: Pools<P>,
	#[cfg(feature = "resource-tracking")]
	resource_table: Option<ResourceTable>,
	shut_down: bool,
}

impl<P: Platform> Device<P> {
	pub fn new(
		create_info: DeviceCreateInfo,
		platform_create_info: P::PlatformCreateInfo,
	) -> Result<Self, DeviceCreateError<P>> {
		let platform = unsafe { P::create_platform(platform_create_info) }.map_err(DeviceCreateError::Platform)?;
		let limits = match create_info.limits {
			Some(requested) => {
				let supported = platform.limits();
				if !requested.is_within_limit(supported) {
					return Err(DeviceCreateError::LimitsExceeded { requested, supported });
				}
				requested
			}
			None => DeviceLimits::reasonable_defaults(&platform),
		};

		let id = DeviceId::next();
		#[cfg(feature = "resource-tracking")]
		let resource_table = create_info.debug_tracking.then(|| ResourceTable::new(id));
		#[cfg(not(feature = "resource-tracking"))]
		if create_info.debug_tracking {
			log::warn!(
				"{id} \"{}\": debug tracking requested, but the `resource-tracking` feature is disabled",
				create_info.name
			);
		}
		log::trace!("{id} \"{}\": created with {limits:?}", create_info.name);

		Ok(Self {
			id,
			name: create_info.name.to_owned(),
			limits,
			platform,
			pools: Pools::new(),
			#[cfg(feature = "resource-tracking")]
			resource_table,
			shut_down: false,
		})
	}

	#[inline]
	pub fn id(&self) -> DeviceId {
		self.id
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[inline]
	pub fn limits(&self) -> &DeviceLimits {
		&self.limits
	}

	#[inline]
	pub fn platform(&self) -> &P {
		&self.platform
	}

	/// Whether live handles are tracked in a resource table.
	pub fn is_tracking(&self) -> bool {
		#[cfg(feature = "resource-tracking")]
		{
			self.resource_table.is_some()
		}
		#[cfg(not(feature = "resource-tracking"))]
		{
			false
		}
	}

	/// All tracked live resources, ordered by kind. Always empty if [`Self::is_tracking`] is false.
	pub fn live_resources(&self) -> Vec<LiveResource> {
		#[cfg(feature = "resource-tracking")]
		if let Some(table) = &self.resource_table {
			return table.enumerate_live();
		}
		Vec::new()
	}

	/// The amount of live resources, whether they are tracked or not.
	pub fn live_count(&self) -> usize {
		self.pools.len()
	}

	fn try_entry<K: DeviceResource<P>>(&self, handle: Handle<K>) -> Option<&Entry<K::Object, K::Meta>> {
		if handle.device() == self.id {
			K::pool(&self.pools).get(handle.id())
		} else {
			None
		}
	}

	fn try_entry_mut<K: DeviceResource<P>>(&mut self, handle: Handle<K>) -> Option<&mut Entry<K::Object, K::Meta>> {
		if handle.device() == self.id {
			K::pool_mut(&mut self.pools).get_mut(handle.id())
		} else {
			None
		}
	}

	pub fn is_alive<K: DeviceResource<P>>(&self, handle: Handle<K>) -> bool {
		self.try_entry(handle).is_some()
	}

	/// # Panics
	/// If `handle` was destroyed or belongs to another device.
	#[track_caller]
	pub fn entry<K: DeviceResource<P>>(&self, handle: Handle<K>) -> &Entry<K::Object, K::Meta> {
		match self.try_entry(handle) {
			Some(entry) => entry,
			None => dead_handle(self.id, handle),
		}
	}

	#[track_caller]
	fn entry_mut<K: DeviceResource<P>>(&mut self, handle: Handle<K>) -> &mut Entry<K::Object, K::Meta> {
		let id = self.id;
		match self.try_entry_mut(handle) {
			Some(entry) => entry,
			None => dead_handle(id, handle),
		}
	}

	/// The debug label a resource was created with.
	#[track_caller]
	pub fn label<K: DeviceResource<P>>(&self, handle: Handle<K>) -> &str {
		&self.entry(handle).name
	}

	#[track_caller]
	pub fn meta<K: DeviceResource<P>>(&self, handle: Handle<K>) -> &K::Meta {
		&self.entry(handle).meta
	}

	/// The platform's implementation object, for platform specific code such as command recording.
	#[track_caller]
	pub fn implementation<K: DeviceResource<P>>(&self, handle: Handle<K>) -> &K::Object {
		&self.entry(handle).object
	}

	/// Look up a resource referenced by the create info of resource `referrer`.
	pub(crate) fn lookup<K: DeviceResource<P>>(
		&self,
		handle: Handle<K>,
		referrer: &str,
	) -> Result<&Entry<K::Object, K::Meta>, ValidationError> {
		self.try_entry(handle).ok_or_else(|| ValidationError::DeadHandle {
			name: referrer.to_owned(),
			kind: K::KIND,
		})
	}

	pub(crate) fn check_capacity<K: DeviceResource<P>>(&self) -> Result<(), CreateError<P>> {
		Ok(K::pool(&self.pools).check_capacity()?)
	}

	/// Store an implementation object and track its handle. Must be preceded by [`Self::check_capacity`].
	pub(crate) fn insert<K: DeviceResource<P>>(&mut self, object: K::Object, meta: K::Meta, name: &str) -> Handle<K> {
		let entry = Entry {
			object,
			meta,
			name: name.to_owned(),
			users: 0,
		};
		let id = K::pool_mut(&mut self.pools)
			.insert(entry)
			.unwrap_or_else(|err| unreachable!("{err} after checking capacity"));
		let handle = Handle::new(self.id, id);
		#[cfg(feature = "resource-tracking")]
		if let Some(table) = &mut self.resource_table {
			table.register(handle.erase(), name);
		}
		log::trace!("{}: created {} \"{}\"", self.id, K::KIND, name);
		handle
	}

	/// Create a resource that doesn't reference any other resource.
	fn create_resource<K: DeviceResource<P>>(
		&mut self,
		name: &str,
		meta: K::Meta,
		create: impl FnOnce(&P) -> Result<K::Object, P::AllocationError>,
	) -> Result<Handle<K>, CreateError<P>> {
		self.check_capacity::<K>()?;
		let object = create(&self.platform).map_err(CreateError::Platform)?;
		Ok(self.insert(object, meta, name))
	}

	/// Untrack and destroy a resource, returning what the device remembered about it so dependencies can be released.
	///
	/// # Panics
	/// If `handle` was already destroyed, belongs to another device, is not tracked or is still in use.
	#[track_caller]
	pub(crate) fn retire<K: DeviceResource<P>>(&mut self, handle: Handle<K>) -> K::Meta {
		let entry = self.entry(handle);
		if entry.users != 0 {
			panic!(
				"{}: can't destroy {} \"{}\" while it is still in use by {} other resources",
				self.id,
				K::KIND,
				entry.name,
				entry.users
			);
		}
		#[cfg(feature = "resource-tracking")]
		if let Some(table) = &mut self.resource_table {
			if !table.unregister(handle.erase()) {
				panic!("{}: can't destroy {:?} as it is not tracked", self.id, handle);
			}
		}
		let Some(entry) = K::pool_mut(&mut self.pools).remove(handle.id()) else {
			unreachable!()
		};
		log::trace!("{}: destroyed {} \"{}\"", self.id, K::KIND, entry.name);
		unsafe { K::destroy(&self.platform, entry.object) };
		entry.meta
	}

	#[track_caller]
	pub(crate) fn acquire<K: DeviceResource<P>>(&mut self, handle: Handle<K>) {
		self.entry_mut(handle).users += 1;
	}

	#[track_caller]
	pub(crate) fn release<K: DeviceResource<P>>(&mut self, handle: Handle<K>) {
		self.entry_mut(handle).users -= 1;
	}

	fn release_all<K: DeviceResource<P>>(&mut self) {
		let Self { pools, platform, .. } = self;
		for (_, entry) in K::pool_mut(pools).drain() {
			unsafe { K::destroy(platform, entry.object) };
		}
	}

	/// Shut down the device, destroying all resources that are still alive and reporting them as leaked if they were
	/// tracked.
	pub fn shutdown(mut self) -> LeakReport {
		self.teardown()
	}

	fn teardown(&mut self) -> LeakReport {
		profiling::function_scope!();
		self.shut_down = true;

		#[cfg(feature = "resource-tracking")]
		let leaks = self
			.resource_table
			.as_mut()
			.map(|table| {
				let live = table.enumerate_live();
				table.clear();
				live
			})
			.unwrap_or_default();
		#[cfg(not(feature = "resource-tracking"))]
		let leaks = Vec::new();
		for leak in &leaks {
			log::error!("{} \"{}\": leaked {}", self.id, self.name, leak);
		}

		self.release_all::<kind::BindingSet>();
		self.release_all::<kind::GraphicsPipeline>();
		self.release_all::<kind::ComputePipeline>();
		self.release_all::<kind::TextureTable>();
		self.release_all::<kind::SamplerTable>();
		self.release_all::<kind::BindingSetLayout>();
		self.release_all::<kind::ShaderModule>();
		self.release_all::<kind::Sampler>();
		self.release_all::<kind::Texture>();
		self.release_all::<kind::Buffer>();
		log::trace!("{} \"{}\": shut down", self.id, self.name);

		LeakReport { device: self.id, leaks }
	}
}

#[track_caller]
fn dead_handle<K: Kind>(device: DeviceId, handle: Handle<K>) -> ! {
	panic!(
		"{device}: {handle:?} was already destroyed or belongs to another device",
	)
}

impl<P: Platform> Drop for Device<P> {
	fn drop(&mut self) {
		if !self.shut_down {
			self.teardown();
		}
	}
}

impl<P: Platform> Debug for Device<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Device")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("tracking", &self.is_tracking())
			.field("live_count", &self.live_count())
			.finish()
	}
}

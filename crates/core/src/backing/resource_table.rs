use crate::backing::id::DeviceId;
use crate::descriptor::AnyHandle;
use crate::device::LiveResource;
use rustc_hash::FxHashMap;

/// Debug bookkeeping of every live handle a [`Device`](crate::device::Device) created, with its debug label.
///
/// It records but never decides anything: the device registers handles after creation and unregisters them before
/// destroying the implementation object, treating a failed unregister as misuse. Only compiled with the
/// `resource-tracking` feature.
#[derive(Debug)]
pub struct ResourceTable {
	device: DeviceId,
	entries: FxHashMap<AnyHandle, String>,
}

impl ResourceTable {
	pub fn new(device: DeviceId) -> Self {
		Self {
			device,
			entries: FxHashMap::default(),
		}
	}

	#[inline]
	pub fn device(&self) -> DeviceId {
		self.device
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// # Panics
	/// If `handle` belongs to another device or is already registered.
	pub fn register(&mut self, handle: AnyHandle, label: &str) {
		assert_eq!(handle.device, self.device, "{handle:?} belongs to another device");
		let prev = self.entries.insert(handle, label.to_owned());
		assert!(prev.is_none(), "{handle:?} was registered twice");
	}

	/// Returns false if `handle` is not registered under this table's device.
	pub fn unregister(&mut self, handle: AnyHandle) -> bool {
		handle.device == self.device && self.entries.remove(&handle).is_some()
	}

	pub fn contains(&self, handle: AnyHandle) -> bool {
		self.entries.contains_key(&handle)
	}

	/// All registered handles, ordered by kind and slot.
	pub fn enumerate_live(&self) -> Vec<LiveResource> {
		let mut live = self
			.entries
			.iter()
			.map(|(handle, label)| LiveResource {
				handle: *handle,
				label: label.clone(),
			})
			.collect::<Vec<_>>();
		live.sort();
		live
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}

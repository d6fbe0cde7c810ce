use crate::backing::id::{SlotIndex, MAX_SLOTS};
use crate::descriptor::{BindingSetHandle, DeviceLimits, Handle, Kind, ResourceKind, ValidationError};
use smallvec::SmallVec;
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;

/// How many slots a bindless table has.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TableCapacity {
	/// Exactly this many slots.
	Fixed(u32),
	/// Starts out with `initial` slots and grows on demand when binding to a higher slot, up to `max` slots. Native
	/// descriptor arrays are always sized for `max`.
	Growable { initial: u32, max: u32 },
}

impl TableCapacity {
	pub fn initial(&self) -> u32 {
		match *self {
			TableCapacity::Fixed(capacity) => capacity,
			TableCapacity::Growable { initial, .. } => initial,
		}
	}

	pub fn max(&self) -> u32 {
		match *self {
			TableCapacity::Fixed(capacity) => capacity,
			TableCapacity::Growable { max, .. } => max,
		}
	}
}

#[derive(Copy, Clone, Debug)]
pub struct BindlessTableCreateInfo<'a> {
	pub capacity: TableCapacity,
	/// Name of the table, for tracking and debugging purposes
	pub name: &'a str,
}

impl BindlessTableCreateInfo<'_> {
	pub fn validate(&self, kind: ResourceKind, limits: &DeviceLimits) -> Result<(), ValidationError> {
		let max = limits.max_table_capacity.min(MAX_SLOTS);
		let capacity = self.capacity;
		if capacity.max() == 0 || capacity.max() > max || capacity.initial() > capacity.max() {
			return Err(ValidationError::InvalidTableCapacity {
				kind,
				name: self.name.to_owned(),
				capacity: capacity.max(),
				max,
			});
		}
		Ok(())
	}
}

/// The slots of a bindless table holding resources of kind `K`, and the binding sets observing it. Only the
/// addressable slots are allocated, a growable table allocates more as it grows.
pub struct TableState<K: Kind> {
	slots: Vec<Option<Handle<K>>>,
	max: u32,
	growable: bool,
	dependents: SmallVec<[(BindingSetHandle, u32); 4]>,
}

impl<K: Kind> TableState<K> {
	pub fn new(capacity: TableCapacity) -> Self {
		Self {
			slots: vec![None; capacity.initial() as usize],
			max: capacity.max(),
			growable: matches!(capacity, TableCapacity::Growable { .. }),
			dependents: SmallVec::new(),
		}
	}

	/// The amount of currently addressable slots.
	#[inline]
	pub fn capacity(&self) -> u32 {
		self.slots.len() as u32
	}

	/// The amount of slots this table can ever address.
	#[inline]
	pub fn max_capacity(&self) -> u32 {
		self.max
	}

	/// Checks whether `index` is addressable, or may be made addressable by growing. Modifies nothing. Returns the
	/// addressable limit on failure.
	pub fn check_index(&self, index: u32) -> Result<SlotIndex, u32> {
		let limit = if self.growable { self.max } else { self.capacity() };
		if index < limit {
			SlotIndex::new(index).ok_or(limit)
		} else {
			Err(limit)
		}
	}

	pub fn get(&self, index: u32) -> Option<Handle<K>> {
		self.slots.get(index as usize).copied().flatten()
	}

	/// Replaces the contents of a slot previously checked by [`Self::check_index`] and returns the previous contents.
	/// Only binding a resource grows the table, clearing a slot past the current capacity is a no-op.
	pub fn replace(&mut self, index: SlotIndex, handle: Option<Handle<K>>) -> Option<Handle<K>> {
		let index = index.to_usize();
		if handle.is_some() && index >= self.slots.len() {
			self.slots.resize(index + 1, None);
		}
		match self.slots.get_mut(index) {
			Some(slot) => core::mem::replace(slot, handle),
			None => None,
		}
	}

	/// All occupied slots.
	pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, Handle<K>)> + '_ {
		self.slots
			.iter()
			.enumerate()
			.filter_map(|(i, h)| Some((SlotIndex::new(i as u32)?, (*h)?)))
	}

	/// Empties every slot, returning the previous contents.
	pub fn clear(&mut self) -> Vec<Handle<K>> {
		self.slots.iter_mut().filter_map(|slot| slot.take()).collect()
	}

	pub fn dependents(&self) -> &[(BindingSetHandle, u32)] {
		&self.dependents
	}

	pub fn add_dependent(&mut self, set: BindingSetHandle, binding: u32) {
		self.dependents.push((set, binding));
	}

	pub fn remove_dependent(&mut self, set: BindingSetHandle, binding: u32) {
		self.dependents.retain(|dependent| *dependent != (set, binding));
	}
}

impl<K: Kind> Debug for TableState<K> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TableState")
			.field("kind", &K::KIND)
			.field("capacity", &self.capacity())
			.field("max_capacity", &self.max_capacity())
			.field("occupied", &self.iter().count())
			.field("dependents", &self.dependents.len())
			.finish()
	}
}

/// Misuse of a bindless table which is reported to the caller instead of panicking. Nothing was modified.
#[derive(Error, Clone, PartialEq, Eq)]
pub enum TableError {
	#[error("{kind} \"{name}\" has a capacity of {capacity}, slot {index} is out of range")]
	OutOfRange {
		kind: ResourceKind,
		name: String,
		index: u32,
		capacity: u32,
	},
	#[error("{element_kind} \"{element}\" lacks the usage required to be bound to {kind} \"{name}\"")]
	MissingUsage {
		kind: ResourceKind,
		name: String,
		element_kind: ResourceKind,
		element: String,
	},
	#[error("{kind} \"{name}\" is still referenced by {dependents} binding sets, destroy those first")]
	TableInUse {
		kind: ResourceKind,
		name: String,
		dependents: usize,
	},
}

impl Debug for TableError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self, f)
	}
}

use crate::backing::id::{ResourceId, SlotIndex, SlotVersion, MAX_SLOTS};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Generation-checked storage of backend implementation objects. Inserting hands out a [`ResourceId`], removing a
/// value bumps the version of its slot before the slot may be reused, so stale ids resolve to nothing.
///
/// A slot whose version would no longer fit into [`ID_VERSION_BITS`](crate::backing::id::ID_VERSION_BITS) is retired
/// and never handed out again.
pub struct Arena<T> {
	slots: Vec<ArenaSlot<T>>,
	dead_queue: Vec<SlotIndex>,
	len: usize,
	capacity: u32,
}

struct ArenaSlot<T> {
	version: u32,
	value: Option<T>,
}

impl<T> Default for Arena<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Arena<T> {
	pub fn new() -> Self {
		Self::with_max_slots(MAX_SLOTS)
	}

	/// Creates an Arena which will never hold more than `capacity` slots. `capacity` is clamped to [`MAX_SLOTS`].
	pub fn with_max_slots(capacity: u32) -> Self {
		Self {
			slots: Vec::new(),
			dead_queue: Vec::new(),
			len: 0,
			capacity: capacity.min(MAX_SLOTS),
		}
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Checks whether [`Self::insert`] would succeed, without modifying anything.
	pub fn check_capacity(&self) -> Result<(), SlotAllocationError> {
		if !self.dead_queue.is_empty() || (self.slots.len() as u32) < self.capacity {
			Ok(())
		} else {
			Err(SlotAllocationError::NoMoreCapacity(self.capacity))
		}
	}

	pub fn insert(&mut self, value: T) -> Result<ResourceId, SlotAllocationError> {
		let index = if let Some(index) = self.dead_queue.pop() {
			index
		} else {
			let index = self.slots.len() as u32;
			match SlotIndex::new(index) {
				Some(index) if index.to_u32() < self.capacity => {
					self.slots.push(ArenaSlot {
						version: 0,
						value: None,
					});
					index
				}
				_ => return Err(SlotAllocationError::NoMoreCapacity(self.capacity)),
			}
		};

		let slot = &mut self.slots[index.to_usize()];
		debug_assert!(slot.value.is_none());
		slot.value = Some(value);
		self.len += 1;
		// versions of slots in use are always valid, see `remove`
		let version = SlotVersion::new(slot.version).unwrap_or_else(|| unreachable!());
		Ok(ResourceId::new(index, version))
	}

	fn slot(&self, id: ResourceId) -> Option<&ArenaSlot<T>> {
		self.slots
			.get(id.index().to_usize())
			.filter(|slot| slot.version == id.version().to_u32())
	}

	pub fn contains(&self, id: ResourceId) -> bool {
		self.get(id).is_some()
	}

	pub fn get(&self, id: ResourceId) -> Option<&T> {
		self.slot(id).and_then(|slot| slot.value.as_ref())
	}

	pub fn get_mut(&mut self, id: ResourceId) -> Option<&mut T> {
		self.slots
			.get_mut(id.index().to_usize())
			.filter(|slot| slot.version == id.version().to_u32())
			.and_then(|slot| slot.value.as_mut())
	}

	/// Removes the value of `id`, returning None if `id` is stale.
	pub fn remove(&mut self, id: ResourceId) -> Option<T> {
		let index = id.index();
		let slot = self
			.slots
			.get_mut(index.to_usize())
			.filter(|slot| slot.version == id.version().to_u32())?;
		let value = slot.value.take()?;
		self.len -= 1;
		slot.version += 1;
		if SlotVersion::new(slot.version).is_some() {
			self.dead_queue.push(index);
		}
		Some(value)
	}

	pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &T)> + '_ {
		self.slots.iter().enumerate().filter_map(|(i, slot)| {
			let value = slot.value.as_ref()?;
			let id = ResourceId::new(SlotIndex::new(i as u32)?, SlotVersion::new(slot.version)?);
			Some((id, value))
		})
	}

	/// Removes all values, yielding them in slot order.
	pub fn drain(&mut self) -> impl Iterator<Item = (ResourceId, T)> + '_ {
		let ids = self.iter().map(|(id, _)| id).collect::<Vec<_>>();
		ids.into_iter()
			.filter_map(move |id| self.remove(id).map(|value| (id, value)))
	}
}

impl<T: Debug> Debug for Arena<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SlotAllocationError {
	NoMoreCapacity(u32),
}

impl Error for SlotAllocationError {}

impl Display for SlotAllocationError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			SlotAllocationError::NoMoreCapacity(cap) => {
				write!(f, "Ran out of available slots with a capacity of {}!", *cap)
			}
		}
	}
}

use core::fmt::{Debug, Display, Formatter};
use core::mem;
use static_assertions::const_assert_eq;
use std::sync::atomic::{AtomicU32, Ordering::Relaxed};

pub const ID_INDEX_BITS: u32 = 20;
pub const ID_VERSION_BITS: u32 = 12;

const ID_INDEX_MASK: u32 = (1 << ID_INDEX_BITS) - 1;
const ID_VERSION_MASK: u32 = (1 << ID_VERSION_BITS) - 1;

const ID_INDEX_SHIFT: u32 = 0;
const ID_VERSION_SHIFT: u32 = ID_INDEX_BITS;

/// The maximum amount of slots any [`Arena`](crate::backing::arena::Arena) can hold.
pub const MAX_SLOTS: u32 = 1 << ID_INDEX_BITS;

// uses all 32 bits
const_assert_eq!(ID_INDEX_BITS + ID_VERSION_BITS, 32);
// masks use entire 32 bit range
const_assert_eq!(ID_INDEX_MASK << ID_INDEX_SHIFT | ID_VERSION_MASK << ID_VERSION_SHIFT, !0);
// masks do not overlap
const_assert_eq!(ID_INDEX_MASK << ID_INDEX_SHIFT & ID_VERSION_MASK << ID_VERSION_SHIFT, 0);

/// Identifies one slot of an [`Arena`](crate::backing::arena::Arena). Internally it's a bit packed u32 containing the
/// [`SlotIndex`] and [`SlotVersion`]. A freed slot is reused with a bumped version, so an old `ResourceId` never
/// matches the slot's new occupant.
#[repr(transparent)]
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ResourceId(u32);
const_assert_eq!(mem::size_of::<ResourceId>(), 4);

impl ResourceId {
	pub const fn new(index: SlotIndex, version: SlotVersion) -> Self {
		let mut value = 0;
		value |= (index.0 & ID_INDEX_MASK) << ID_INDEX_SHIFT;
		value |= (version.0 & ID_VERSION_MASK) << ID_VERSION_SHIFT;
		Self(value)
	}

	pub const fn index(&self) -> SlotIndex {
		SlotIndex((self.0 >> ID_INDEX_SHIFT) & ID_INDEX_MASK)
	}

	pub const fn version(&self) -> SlotVersion {
		SlotVersion((self.0 >> ID_VERSION_SHIFT) & ID_VERSION_MASK)
	}

	pub const fn to_u32(&self) -> u32 {
		self.0
	}
}

impl Debug for ResourceId {
	fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ResourceId")
			.field("index", &self.index().to_u32())
			.field("version", &self.version().to_u32())
			.finish()
	}
}

/// The index of [`ResourceId`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct SlotIndex(u32);
const_assert_eq!(mem::size_of::<SlotIndex>(), 4);

impl SlotIndex {
	/// Creates a new `SlotIndex` or None if the index is too large to be represented by [`ID_INDEX_BITS`] bits.
	pub const fn new(index: u32) -> Option<Self> {
		if index == index & ID_INDEX_MASK {
			Some(Self(index))
		} else {
			None
		}
	}

	pub const fn to_u32(&self) -> u32 {
		self.0
	}

	pub const fn to_usize(&self) -> usize {
		self.0 as usize
	}
}

/// The version of [`ResourceId`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct SlotVersion(u32);
const_assert_eq!(mem::size_of::<SlotVersion>(), 4);

impl SlotVersion {
	/// Creates a new `SlotVersion` or None if the version is too large to be represented by [`ID_VERSION_BITS`]
	/// bits.
	pub const fn new(version: u32) -> Option<Self> {
		if version == version & ID_VERSION_MASK {
			Some(Self(version))
		} else {
			None
		}
	}

	pub const fn to_u32(&self) -> u32 {
		self.0
	}
}

/// Process-unique identity of a [`Device`](crate::device::Device). Every handle remembers the device it was created
/// by, so handing it to another device can be detected.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct DeviceId(u32);

static NEXT_DEVICE_ID: AtomicU32 = AtomicU32::new(0);

impl DeviceId {
	pub(crate) fn next() -> Self {
		Self(NEXT_DEVICE_ID.fetch_add(1, Relaxed))
	}

	pub const fn to_u32(&self) -> u32 {
		self.0
	}
}

impl Display for DeviceId {
	fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
		write!(f, "Device#{}", self.0)
	}
}

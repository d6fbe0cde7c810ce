use crate::descriptor::{DeviceLimits, ResourceKind, ValidationError};

bitflags::bitflags! {
	/// Buffer usage specify how you may use a buffer.
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct BufferUsage: u64 {
		/// Can be used as a source of transfer operations
		const TRANSFER_SRC = 0b1;
		/// Can be used as a destination of transfer operations
		const TRANSFER_DST = 0b10;
		/// Allows a buffer to be mapped into host memory. The mapping will optimize for reading from the device.
		const MAP_READ = 0b100;
		/// Allows a buffer to be mapped into host memory. The mapping will optimize for writing to the device.
		const MAP_WRITE = 0b1000;
		/// Can be used as uniform buffer
		const UNIFORM_BUFFER = 0b1_0000;
		/// Can be used as storage buffer
		const STORAGE_BUFFER = 0b10_0000;
		/// Can be used as source of fixed-function index fetch (index buffer)
		const INDEX_BUFFER = 0b100_0000;
		/// Can be used as source of fixed-function vertex fetch (VBO)
		const VERTEX_BUFFER = 0b1000_0000;
		/// Can be the source of indirect parameters (e.g. indirect buffer, parameter buffer)
		const INDIRECT_BUFFER = 0b1_0000_0000;
	}
}

impl BufferUsage {
	#[inline]
	pub fn is_mappable(&self) -> bool {
		self.intersects(BufferUsage::MAP_READ | BufferUsage::MAP_WRITE)
	}
}

#[derive(Copy, Clone, Debug, Default)]
pub struct BufferCreateInfo<'a> {
	/// Size of the buffer in bytes, must not be zero.
	pub size: u64,
	pub usage: BufferUsage,
	/// Name of the buffer, for tracking and debugging purposes
	pub name: &'a str,
}

impl BufferCreateInfo<'_> {
	pub fn validate(&self, limits: &DeviceLimits) -> Result<(), ValidationError> {
		if self.size == 0 {
			Err(ValidationError::ZeroBufferSize {
				name: self.name.to_owned(),
			})
		} else if self.size > limits.max_buffer_size {
			Err(ValidationError::BufferTooLarge {
				name: self.name.to_owned(),
				size: self.size,
				max: limits.max_buffer_size,
			})
		} else if self.usage.is_empty() {
			Err(ValidationError::NoUsageDeclared {
				kind: ResourceKind::Buffer,
				name: self.name.to_owned(),
			})
		} else {
			Ok(())
		}
	}
}

/// What the [`Device`](crate::device::Device) remembers about a buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BufferMeta {
	pub size: u64,
	pub usage: BufferUsage,
}

use glam::{UVec2, UVec3};

#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct Extent {
	pub width: u32,
	pub height: u32,
	pub depth: u32,
}

impl Extent {
	pub const fn new(width: u32, height: u32, depth: u32) -> Self {
		Self { width, height, depth }
	}

	pub fn max_dimension(&self) -> u32 {
		self.width.max(self.height).max(self.depth)
	}

	pub fn texel_count(&self) -> u64 {
		self.width as u64 * self.height as u64 * self.depth as u64
	}
}

impl From<[u32; 3]> for Extent {
	fn from(value: [u32; 3]) -> Self {
		Extent {
			width: value[0],
			height: value[1],
			depth: value[2],
		}
	}
}

impl From<[u32; 2]> for Extent {
	fn from(value: [u32; 2]) -> Self {
		Extent {
			width: value[0],
			height: value[1],
			depth: 1,
		}
	}
}

impl From<u32> for Extent {
	fn from(value: u32) -> Self {
		Extent {
			width: value,
			height: 1,
			depth: 1,
		}
	}
}

impl From<UVec3> for Extent {
	fn from(value: UVec3) -> Self {
		Extent {
			width: value.x,
			height: value.y,
			depth: value.z,
		}
	}
}

impl From<UVec2> for Extent {
	fn from(value: UVec2) -> Self {
		Extent {
			width: value.x,
			height: value.y,
			depth: 1,
		}
	}
}

impl From<Extent> for [u32; 3] {
	fn from(value: Extent) -> Self {
		[value.width, value.height, value.depth]
	}
}

impl From<Extent> for UVec3 {
	fn from(value: Extent) -> Self {
		UVec3::new(value.width, value.height, value.depth)
	}
}

impl From<Extent> for UVec2 {
	fn from(value: Extent) -> Self {
		UVec2::new(value.width, value.height)
	}
}

impl Default for Extent {
	fn default() -> Self {
		Extent {
			width: 1,
			height: 1,
			depth: 1,
		}
	}
}

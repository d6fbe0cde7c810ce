use crate::platform::Platform;

/// Structural limits a [`Device`](crate::device::Device) validates creation parameters against.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DeviceLimits {
	pub max_buffer_size: u64,
	/// Maximum width, height and depth of any texture.
	pub max_texture_dimension: u32,
	pub max_texture_array_layers: u32,
	/// Maximum slot count of a texture or sampler table, also bounds the capacity of table bindings in layouts.
	pub max_table_capacity: u32,
	/// Maximum amount of binding set layouts a pipeline may reference.
	pub max_bind_sets: u32,
	pub max_bindings_per_layout: u32,
}

impl DeviceLimits {
	pub fn limits<P: Platform>(platform: &P) -> Self {
		platform.limits()
	}

	pub const REASONABLE_DEFAULTS: Self = DeviceLimits {
		max_buffer_size: 1 << 30,
		max_texture_dimension: 8192,
		max_texture_array_layers: 256,
		max_table_capacity: 10_000,
		max_bind_sets: 4,
		max_bindings_per_layout: 32,
	};

	pub fn reasonable_defaults<P: Platform>(platform: &P) -> Self {
		Self::REASONABLE_DEFAULTS.min(Self::limits(platform))
	}

	pub fn is_within_limit(&self, limit: Self) -> bool {
		// just to make sure this is updated as well
		let DeviceLimits {
			max_buffer_size,
			max_texture_dimension,
			max_texture_array_layers,
			max_table_capacity,
			max_bind_sets,
			max_bindings_per_layout,
		} = *self;
		max_buffer_size <= limit.max_buffer_size
			&& max_texture_dimension <= limit.max_texture_dimension
			&& max_texture_array_layers <= limit.max_texture_array_layers
			&& max_table_capacity <= limit.max_table_capacity
			&& max_bind_sets <= limit.max_bind_sets
			&& max_bindings_per_layout <= limit.max_bindings_per_layout
	}

	pub fn min(self, other: Self) -> Self {
		Self {
			max_buffer_size: self.max_buffer_size.min(other.max_buffer_size),
			max_texture_dimension: self.max_texture_dimension.min(other.max_texture_dimension),
			max_texture_array_layers: self.max_texture_array_layers.min(other.max_texture_array_layers),
			max_table_capacity: self.max_table_capacity.min(other.max_table_capacity),
			max_bind_sets: self.max_bind_sets.min(other.max_bind_sets),
			max_bindings_per_layout: self.max_bindings_per_layout.min(other.max_bindings_per_layout),
		}
	}
}

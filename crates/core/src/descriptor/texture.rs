use crate::descriptor::{DeviceLimits, Extent, ResourceKind, ValidationError};

bitflags::bitflags! {
	/// Texture usage specify how you may use the texture.
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct TextureUsage: u64 {
		/// Can be used as a source of transfer operations
		const TRANSFER_SRC = 0b1;
		/// Can be used as a destination of transfer operations
		const TRANSFER_DST = 0b10;
		/// Can be sampled from with a sampler
		const SAMPLED = 0b100;
		/// Can be used as storage image
		const STORAGE = 0b1000;
		/// Can be used as framebuffer color attachment
		const COLOR_ATTACHMENT = 0b1_0000;
		/// Can be used as framebuffer depth/stencil attachment
		const DEPTH_STENCIL_ATTACHMENT = 0b10_0000;
	}
}

/// Which of the extent's dimensions a texture uses. Unused dimensions must be `1`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TextureDimension {
	D1,
	#[default]
	D2,
	D3,
	/// A 2D texture with six faces per array layer, width and height must match.
	Cube,
}

impl TextureDimension {
	/// The dimensions of an extent this texture uses: width, height, depth.
	pub fn used_dimensions(&self) -> [bool; 3] {
		match self {
			TextureDimension::D1 => [true, false, false],
			TextureDimension::D2 | TextureDimension::Cube => [true, true, false],
			TextureDimension::D3 => [true, true, true],
		}
	}
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Format {
	R8Unorm,
	#[default]
	Rgba8Unorm,
	Rgba8Srgb,
	Bgra8Unorm,
	Bgra8Srgb,
	R16Float,
	Rgba16Float,
	R32Float,
	Rgba32Float,
	D16Unorm,
	D32Float,
	D24UnormS8Uint,
}

impl Format {
	pub fn bytes_per_texel(&self) -> u64 {
		match self {
			Format::R8Unorm => 1,
			Format::R16Float | Format::D16Unorm => 2,
			Format::Rgba8Unorm
			| Format::Rgba8Srgb
			| Format::Bgra8Unorm
			| Format::Bgra8Srgb
			| Format::R32Float
			| Format::D32Float
			| Format::D24UnormS8Uint => 4,
			Format::Rgba16Float => 8,
			Format::Rgba32Float => 16,
		}
	}

	pub fn is_depth(&self) -> bool {
		matches!(self, Format::D16Unorm | Format::D32Float | Format::D24UnormS8Uint)
	}
}

/// The amount of samples of the texture. Must be [`SampleCount::Sample1`] if the texture is not multisampled.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum SampleCount {
	#[default]
	Sample1,
	Sample2,
	Sample4,
	Sample8,
	Sample16,
}

#[derive(Copy, Clone, Debug)]
pub struct TextureCreateInfo<'a> {
	pub format: Format,
	pub dimension: TextureDimension,
	/// The extent of the texture: width, height, depth. Dimensions not used by [`Self::dimension`] must be `1`.
	pub extent: Extent,
	/// The amount of mip levels.
	pub mip_levels: u32,
	/// The amount of array layers. Must be a multiple of 6 for [`TextureDimension::Cube`].
	pub array_layers: u32,
	pub samples: SampleCount,
	pub usage: TextureUsage,
	/// Name of the texture, for tracking and debugging purposes
	pub name: &'a str,
}

impl Default for TextureCreateInfo<'_> {
	fn default() -> Self {
		Self {
			format: Format::default(),
			dimension: TextureDimension::default(),
			extent: Extent::default(),
			mip_levels: 1,
			array_layers: 1,
			samples: SampleCount::default(),
			usage: TextureUsage::default(),
			name: "",
		}
	}
}

/// Number of mip levels of a full mip chain for a texture with `max_dimension` as its largest dimension.
pub fn max_mip_levels(max_dimension: u32) -> u32 {
	u32::BITS - max_dimension.max(1).leading_zeros()
}

impl TextureCreateInfo<'_> {
	pub fn validate(&self, limits: &DeviceLimits) -> Result<(), ValidationError> {
		let name = || self.name.to_owned();
		let extent = [self.extent.width, self.extent.height, self.extent.depth];
		for (used, size) in self.dimension.used_dimensions().into_iter().zip(extent) {
			if used && size == 0 {
				return Err(ValidationError::ZeroExtent {
					name: name(),
					extent: self.extent,
				});
			}
			if !used && size != 1 {
				return Err(ValidationError::UnusedDimension {
					name: name(),
					extent: self.extent,
					dimension: self.dimension,
				});
			}
		}
		if self.extent.max_dimension() > limits.max_texture_dimension {
			return Err(ValidationError::TextureTooLarge {
				name: name(),
				extent: self.extent,
				max: limits.max_texture_dimension,
			});
		}
		if self.dimension == TextureDimension::Cube && self.extent.width != self.extent.height {
			return Err(ValidationError::NonSquareCube {
				name: name(),
				extent: self.extent,
			});
		}

		let max_mips = max_mip_levels(self.extent.max_dimension());
		if self.mip_levels == 0 || self.mip_levels > max_mips {
			return Err(ValidationError::InvalidMipLevels {
				name: name(),
				mip_levels: self.mip_levels,
				max: max_mips,
			});
		}
		let layers_valid = match self.dimension {
			TextureDimension::Cube => self.array_layers != 0 && self.array_layers % 6 == 0,
			TextureDimension::D3 => self.array_layers == 1,
			_ => self.array_layers != 0,
		};
		if !layers_valid || self.array_layers > limits.max_texture_array_layers {
			return Err(ValidationError::InvalidArrayLayers {
				name: name(),
				array_layers: self.array_layers,
				dimension: self.dimension,
			});
		}
		if self.samples != SampleCount::Sample1 && self.mip_levels != 1 {
			return Err(ValidationError::MultisampledMips { name: name() });
		}
		if self.usage.is_empty() {
			return Err(ValidationError::NoUsageDeclared {
				kind: ResourceKind::Texture,
				name: name(),
			});
		}
		Ok(())
	}

	/// Bytes required to store all mips and layers of this texture.
	pub fn size_in_bytes(&self) -> u64 {
		let mut total = 0;
		let mut extent = self.extent;
		for _ in 0..self.mip_levels {
			total += extent.texel_count() * self.format.bytes_per_texel();
			extent = Extent::new(
				(extent.width / 2).max(1),
				(extent.height / 2).max(1),
				(extent.depth / 2).max(1),
			);
		}
		total * self.array_layers as u64
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TextureMeta {
	pub format: Format,
	pub dimension: TextureDimension,
	pub extent: Extent,
	pub mip_levels: u32,
	pub array_layers: u32,
	pub usage: TextureUsage,
}

impl From<&TextureCreateInfo<'_>> for TextureMeta {
	fn from(ci: &TextureCreateInfo<'_>) -> Self {
		Self {
			format: ci.format,
			dimension: ci.dimension,
			extent: ci.extent,
			mip_levels: ci.mip_levels,
			array_layers: ci.array_layers,
			usage: ci.usage,
		}
	}
}

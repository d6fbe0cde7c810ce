use crate::descriptor::ValidationError;

/// Texel mixing mode when sampling between texels.
///
/// Docs copied from wgpu.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum Filter {
	/// Nearest neighbor sampling.
	///
	/// This creates a pixelated effect when used as a mag filter
	#[default]
	Nearest = 0,
	/// Linear Interpolation
	///
	/// This makes textures smooth but blurry when used as a mag filter.
	Linear = 1,
}

/// How edges should be handled in texture addressing.
///
/// Docs copied from wgpu.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash)]
pub enum AddressMode {
	/// Clamp the value to the edge of the texture
	///
	/// -0.25 -> 0.0
	/// 1.25  -> 1.0
	#[default]
	ClampToEdge = 0,
	/// Repeat the texture in a tiling fashion
	///
	/// -0.25 -> 0.75
	/// 1.25 -> 0.25
	Repeat = 1,
	/// Repeat the texture, mirroring it every repeat
	///
	/// -0.25 -> 0.25
	/// 1.25 -> 0.75
	MirrorRepeat = 2,
	/// Clamp the value to the border of the texture
	///
	/// -0.25 -> border
	/// 1.25 -> border
	ClampToBorder = 3,
}

/// Color variation to use when sampler addressing mode is [`AddressMode::ClampToBorder`]
///
/// Docs copied from wgpu.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BorderColor {
	/// [0, 0, 0, 0]
	#[default]
	TransparentBlack,
	/// [0, 0, 0, 1]
	OpaqueBlack,
	/// [1, 1, 1, 1]
	OpaqueWhite,
}

#[derive(Copy, Clone, Default, Debug)]
pub struct SamplerCreateInfo<'a> {
	pub mag_filter: Filter,
	pub min_filter: Filter,
	pub mipmap_mode: Filter,
	pub address_mode_u: AddressMode,
	pub address_mode_v: AddressMode,
	pub address_mode_w: AddressMode,
	pub max_anisotropy: Option<f32>,
	pub min_lod: f32,
	pub max_lod: Option<f32>,
	pub border_color: BorderColor,
	/// Name of the sampler, for tracking and debugging purposes
	pub name: &'a str,
}

impl SamplerCreateInfo<'_> {
	pub fn validate(&self) -> Result<(), ValidationError> {
		let lod_valid = self.min_lod >= 0. && self.max_lod.map_or(true, |max_lod| self.min_lod <= max_lod);
		if !lod_valid {
			return Err(ValidationError::InvalidLodRange {
				name: self.name.to_owned(),
				min_lod: self.min_lod,
				max_lod: self.max_lod,
			});
		}
		if let Some(max_anisotropy) = self.max_anisotropy {
			if !(1. ..=16.).contains(&max_anisotropy) {
				return Err(ValidationError::InvalidAnisotropy {
					name: self.name.to_owned(),
					max_anisotropy,
				});
			}
		}
		Ok(())
	}
}

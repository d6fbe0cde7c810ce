use crate::descriptor::ValidationError;

bitflags::bitflags! {
	/// The shader stages a binding is visible to, or a pipeline consists of.
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct ShaderStages: u32 {
		const VERTEX = 0b1;
		const FRAGMENT = 0b10;
		const COMPUTE = 0b100;
		const ALL_GRAPHICS = Self::VERTEX.bits() | Self::FRAGMENT.bits();
	}
}

/// The single stage a shader module is compiled for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShaderStage {
	Vertex,
	Fragment,
	Compute,
}

impl ShaderStage {
	pub fn to_stages(&self) -> ShaderStages {
		match self {
			ShaderStage::Vertex => ShaderStages::VERTEX,
			ShaderStage::Fragment => ShaderStages::FRAGMENT,
			ShaderStage::Compute => ShaderStages::COMPUTE,
		}
	}
}

/// A compiled shader, typically SPIR-V. Compiling and reflecting shaders is not the concern of this crate, the code is
/// passed through to the platform as is.
#[derive(Copy, Clone, Debug)]
pub struct ShaderModuleCreateInfo<'a> {
	pub stage: ShaderStage,
	/// Shader binary, must be a non-empty sequence of 4 byte words.
	pub code: &'a [u8],
	pub entry_point: &'a str,
	/// Name of the shader module, for tracking and debugging purposes
	pub name: &'a str,
}

impl ShaderModuleCreateInfo<'_> {
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.code.is_empty() {
			Err(ValidationError::EmptyShaderCode {
				name: self.name.to_owned(),
			})
		} else if self.code.len() % 4 != 0 {
			Err(ValidationError::MisalignedShaderCode {
				name: self.name.to_owned(),
				len: self.code.len(),
			})
		} else if self.entry_point.is_empty() {
			Err(ValidationError::EmptyEntryPoint {
				name: self.name.to_owned(),
			})
		} else {
			Ok(())
		}
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShaderModuleMeta {
	pub stage: ShaderStage,
	pub entry_point: String,
}

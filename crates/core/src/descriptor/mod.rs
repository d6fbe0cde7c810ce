mod binding_set;
mod binding_set_layout;
mod bindless_table;
mod buffer;
mod extent;
mod handle;
mod limits;
mod sampler;
mod shader_module;
mod texture;
mod validation;

pub use binding_set::*;
pub use binding_set_layout::*;
pub use bindless_table::*;
pub use buffer::*;
pub use extent::*;
pub use handle::*;
pub use limits::*;
pub use sampler::*;
pub use shader_module::*;
pub use texture::*;
pub use validation::*;

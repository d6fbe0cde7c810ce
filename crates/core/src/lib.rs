pub mod backing;
pub mod descriptor;
pub mod device;
pub mod pipeline;
pub mod platform;

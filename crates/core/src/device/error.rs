use crate::backing::arena::SlotAllocationError;
use crate::descriptor::{DeviceLimits, ValidationError};
use crate::platform::Platform;
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;

#[derive(Error)]
pub enum DeviceCreateError<P: Platform> {
	#[error("Platform Error: {0}")]
	Platform(#[source] P::PlatformCreateError),
	#[error("Requested limits {requested:?} exceed the limits {supported:?} supported by the platform")]
	LimitsExceeded {
		requested: DeviceLimits,
		supported: DeviceLimits,
	},
}

impl<P: Platform> Debug for DeviceCreateError<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self, f)
	}
}

/// A failed `create_*` call. Nothing was created or registered.
#[derive(Error)]
pub enum CreateError<P: Platform> {
	#[error("Validation Error: {0}")]
	Validation(#[from] ValidationError),
	#[error("Platform Error: {0}")]
	Platform(#[source] P::AllocationError),
	#[error("Slot Allocation Error: {0}")]
	Slot(#[from] SlotAllocationError),
}

impl<P: Platform> Debug for CreateError<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self, f)
	}
}

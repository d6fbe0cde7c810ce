use crate::backing::id::DeviceId;
use crate::descriptor::{AnyHandle, ResourceKind};
use std::fmt::{Display, Formatter};

/// A resource that is alive, as recorded by the resource table.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LiveResource {
	pub handle: AnyHandle,
	pub label: String,
}

impl LiveResource {
	#[inline]
	pub fn kind(&self) -> ResourceKind {
		self.handle.kind
	}
}

impl Display for LiveResource {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{} \"{}\" (index {}, version {})",
			self.handle.kind,
			self.label,
			self.handle.id.index().to_u32(),
			self.handle.id.version().to_u32()
		)
	}
}

/// The tracked resources still alive when a [`Device`](crate::device::Device) was shut down. They have been destroyed
/// forcibly. Always empty if the device did not track resources.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeakReport {
	pub device: DeviceId,
	pub leaks: Vec<LiveResource>,
}

impl LeakReport {
	pub fn is_empty(&self) -> bool {
		self.leaks.is_empty()
	}

	pub fn len(&self) -> usize {
		self.leaks.len()
	}

	/// The amount of leaked resources of a `kind`.
	pub fn count(&self, kind: ResourceKind) -> usize {
		self.leaks.iter().filter(|leak| leak.kind() == kind).count()
	}
}

impl Display for LeakReport {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.leaks.is_empty() {
			return write!(f, "{}: no leaks", self.device);
		}
		writeln!(f, "{}: {} leaked resources", self.device, self.leaks.len())?;
		for leak in &self.leaks {
			writeln!(f, "\t{leak}")?;
		}
		Ok(())
	}
}

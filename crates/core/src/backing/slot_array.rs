use crate::backing::id::SlotIndex;
use std::ops::{Index, IndexMut};

/// A fixed size array indexed by [`SlotIndex`], its length never changes after creation.
#[derive(Debug, Clone)]
pub struct SlotArray<T>(pub Box<[T]>);

impl<T: Default> SlotArray<T> {
	pub fn new(count: u32) -> Self {
		Self::new_generator(count, |_| T::default())
	}
}

impl<T> SlotArray<T> {
	pub fn new_generator(count: u32, f: impl FnMut(u32) -> T) -> Self {
		Self((0..count).map(f).collect::<Vec<_>>().into_boxed_slice())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, index: u32) -> Option<&T> {
		self.0.get(index as usize)
	}

	pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &T)> + '_ {
		self.0
			.iter()
			.enumerate()
			.filter_map(|(i, t)| SlotIndex::new(i as u32).map(|i| (i, t)))
	}
}

impl<T> Index<SlotIndex> for SlotArray<T> {
	type Output = T;

	fn index(&self, index: SlotIndex) -> &Self::Output {
		self.0.index(index.to_usize())
	}
}

impl<T> IndexMut<SlotIndex> for SlotArray<T> {
	fn index_mut(&mut self, index: SlotIndex) -> &mut Self::Output {
		self.0.index_mut(index.to_usize())
	}
}

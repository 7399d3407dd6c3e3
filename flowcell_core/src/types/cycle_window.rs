use anyhow::{Result, ensure};
use std::{fmt, ops::RangeInclusive};

/// Inclusive, zero-based range of sequencing cycles kept in each aligned read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CycleWindow {
	first: usize,
	last: usize,
}

impl CycleWindow {
	pub fn new(first: usize, last: usize) -> Result<Self> {
		ensure!(
			first <= last,
			"first cycle ({first}) must not be greater than last cycle ({last})"
		);
		Ok(CycleWindow { first, last })
	}

	pub fn first(&self) -> usize {
		self.first
	}

	pub fn last(&self) -> usize {
		self.last
	}

	/// Number of cycles in the window. Never zero.
	pub fn cycle_count(&self) -> usize {
		self.last - self.first + 1
	}

	pub fn contains(&self, cycle: usize) -> bool {
		self.range().contains(&cycle)
	}

	pub fn range(&self) -> RangeInclusive<usize> {
		self.first..=self.last
	}
}

impl fmt::Display for CycleWindow {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}..={}]", self.first, self.last)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_cycle() -> Result<()> {
		let window = CycleWindow::new(4, 4)?;
		assert_eq!(window.cycle_count(), 1);
		assert!(window.contains(4));
		assert!(!window.contains(5));
		assert_eq!(window.to_string(), "[4..=4]");
		Ok(())
	}

	#[test]
	fn inverted_window_is_rejected() {
		assert_eq!(
			CycleWindow::new(36, 1).unwrap_err().to_string(),
			"first cycle (36) must not be greater than last cycle (1)"
		);
	}
}

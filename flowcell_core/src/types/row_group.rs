use super::TileKind;

/// One tokenized row from each of the three files of a tile, taken at the same position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowGroup {
	pub intensity: Vec<String>,
	pub sequence: Vec<String>,
	pub quality: Vec<String>,
}

impl RowGroup {
	pub fn new(intensity: Vec<String>, sequence: Vec<String>, quality: Vec<String>) -> Self {
		RowGroup {
			intensity,
			sequence,
			quality,
		}
	}

	pub fn row(&self, kind: TileKind) -> &[String] {
		match kind {
			TileKind::Intensity => &self.intensity,
			TileKind::Sequence => &self.sequence,
			TileKind::Quality => &self.quality,
		}
	}
}

impl From<[Vec<String>; 3]> for RowGroup {
	fn from([intensity, sequence, quality]: [Vec<String>; 3]) -> Self {
		RowGroup::new(intensity, sequence, quality)
	}
}

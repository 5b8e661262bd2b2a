use super::f32::ImageF32;

/// Reconstructed volume: one slice per detector row, top to bottom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Volume {
    pub slices: Vec<ImageF32>,
}

impl Volume {
    pub fn new(slices: Vec<ImageF32>) -> Self {
        Self { slices }
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn slice(&self, index: usize) -> Option<&ImageF32> {
        self.slices.get(index)
    }
}

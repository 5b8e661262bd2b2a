//! Image stack collaborator contract and an in-memory implementation.
//!
//! A stack holds `num_projections` projection images of `width × height`
//! pixels. Each detector row yields one sinogram (`num_projections × width`).
//! Loading stacks from disk is left to callers; the coordinator only needs the
//! [`ImageStack`] trait.

use super::f32::ImageF32;
use crate::error::{CorTiltError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Free-form per-stack metadata. Fit snapshots are written here.
pub type Metadata = BTreeMap<String, Value>;

/// Identity of a stack, stable for its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackId(pub u64);

impl StackId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

pub trait ImageStack: Send + Sync {
    fn id(&self) -> StackId;

    /// Detector width in pixels (columns).
    fn width(&self) -> usize;
    /// Detector height in pixels (rows).
    fn height(&self) -> usize;
    fn num_projections(&self) -> usize;

    /// Number of sinograms that can be formed. One per detector row.
    fn num_sinogram_rows(&self) -> usize {
        self.height()
    }

    /// Projection image at `index`, `None` when out of range.
    fn projection(&self, index: usize) -> Option<ImageF32>;

    /// Sinogram for detector row `row`, `None` when out of range.
    fn sinogram(&self, row: usize) -> Option<ImageF32>;

    fn metadata(&self) -> &Metadata;
    fn metadata_mut(&mut self) -> &mut Metadata;
}

/// Dense projection stack stored as `[projection][row][column]`.
#[derive(Clone, Debug)]
pub struct ProjectionStack {
    id: StackId,
    num_projections: usize,
    height: usize,
    width: usize,
    data: Vec<f32>,
    metadata: Metadata,
}

impl ProjectionStack {
    /// Zero-filled stack. Fails when the voxel count overflows `usize`.
    pub fn new(num_projections: usize, height: usize, width: usize) -> Result<Self> {
        let len = voxel_count(num_projections, height, width)?;
        Ok(Self {
            id: StackId::next(),
            num_projections,
            height,
            width,
            data: vec![0.0; len],
            metadata: Metadata::new(),
        })
    }

    /// Wrap existing projection data laid out as `[projection][row][column]`.
    pub fn from_vec(
        num_projections: usize,
        height: usize,
        width: usize,
        data: Vec<f32>,
    ) -> Result<Self> {
        let expected = voxel_count(num_projections, height, width)?;
        if data.len() != expected {
            return Err(CorTiltError::Configuration(format!(
                "stack data has {} elements, expected {expected} ({num_projections}x{height}x{width})",
                data.len()
            )));
        }
        Ok(Self {
            id: StackId::next(),
            num_projections,
            height,
            width,
            data,
            metadata: Metadata::new(),
        })
    }

    /// Build a stack by evaluating `f(projection, row, column)` for every voxel.
    pub fn from_fn<F>(
        num_projections: usize,
        height: usize,
        width: usize,
        mut f: F,
    ) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        let mut data = Vec::with_capacity(voxel_count(num_projections, height, width)?);
        for p in 0..num_projections {
            for y in 0..height {
                for x in 0..width {
                    data.push(f(p, y, x));
                }
            }
        }
        Ok(Self {
            id: StackId::next(),
            num_projections,
            height,
            width,
            data,
            metadata: Metadata::new(),
        })
    }

    #[inline]
    fn offset(&self, projection: usize, row: usize) -> usize {
        (projection * self.height + row) * self.width
    }
}

impl ImageStack for ProjectionStack {
    fn id(&self) -> StackId {
        self.id
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn num_projections(&self) -> usize {
        self.num_projections
    }

    fn projection(&self, index: usize) -> Option<ImageF32> {
        if index >= self.num_projections {
            return None;
        }
        let start = self.offset(index, 0);
        let end = start + self.height * self.width;
        ImageF32::from_vec(self.width, self.height, self.data[start..end].to_vec())
    }

    fn sinogram(&self, row: usize) -> Option<ImageF32> {
        if row >= self.height {
            return None;
        }
        let mut sino = ImageF32::new(self.width, self.num_projections);
        for p in 0..self.num_projections {
            let start = self.offset(p, row);
            sino.row_mut(p).copy_from_slice(&self.data[start..start + self.width]);
        }
        Some(sino)
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

fn voxel_count(num_projections: usize, height: usize, width: usize) -> Result<usize> {
    num_projections
        .checked_mul(height)
        .and_then(|n| n.checked_mul(width))
        .ok_or_else(|| {
            CorTiltError::Configuration(format!(
                "stack dimensions overflow ({num_projections}x{height}x{width})"
            ))
        })
}

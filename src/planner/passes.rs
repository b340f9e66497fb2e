//! Ordered list of planned passes for a job.

use crate::model::{Path, Point2, Stage};

/// Generator inputs gathered from a pass list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatheredPasses<'a> {
    /// All roughing points, concatenated in pass order.
    pub roughing: Vec<Point2>,
    /// Points of the first smoothing pass, if any.
    pub smoothing: Option<&'a [Point2]>,
}

/// Planned passes in machining order.
#[derive(Debug, Clone, Default)]
pub struct PassList {
    passes: Vec<Path>,
}

impl PassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass.
    pub fn add(&mut self, path: Path) {
        self.passes.push(path);
    }

    /// Insert a pass at `index`, shifting later passes.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, path: Path) {
        self.passes.insert(index, path);
    }

    /// Replace the pass at `index`, returning the previous one.
    pub fn update(&mut self, index: usize, path: Path) -> Option<Path> {
        self.passes
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, path))
    }

    /// Remove the pass at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Path> {
        (index < self.passes.len()).then(|| self.passes.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.passes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.passes.iter()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Count passes planned for a stage.
    pub fn count_by_stage(&self, stage: Stage) -> usize {
        self.passes.iter().filter(|p| p.stage() == stage).count()
    }

    /// Collect generator inputs.
    ///
    /// Roughing passes are concatenated; only the first smoothing pass is
    /// used, later ones are ignored.
    pub fn gather(&self) -> GatheredPasses<'_> {
        let roughing = self
            .passes
            .iter()
            .filter(|p| p.stage() == Stage::Roughing)
            .flat_map(|p| p.points().iter().copied())
            .collect();
        let smoothing = self
            .passes
            .iter()
            .find(|p| p.stage() == Stage::Smoothing)
            .map(Path::points);
        GatheredPasses {
            roughing,
            smoothing,
        }
    }
}

impl<'a> IntoIterator for &'a PassList {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.passes.iter()
    }
}

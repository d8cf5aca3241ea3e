//! Country selection for drawing connections.

use geo_types::Coord;

/// Maximum number of countries armed at once.
pub const MAX_SELECTION: usize = 2;

/// A committed link between two country centroids.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Centroid of the first selected country (lon, lat)
    pub source: Coord<f64>,
    /// Centroid of the second selected country (lon, lat)
    pub target: Coord<f64>,
    pub source_name: String,
    pub target_name: String,
}

/// Result of toggling a country in the selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Added,
    Removed,
    /// The set reached two entries and was cleared; holds them in click order.
    Completed([usize; 2]),
}

/// Ordered set of at most two armed feature indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles membership; completing a pair empties the set.
    pub fn toggle(&mut self, index: usize) -> SelectionOutcome {
        if let Some(pos) = self.items.iter().position(|i| *i == index) {
            self.items.remove(pos);
            return SelectionOutcome::Removed;
        }

        self.items.push(index);
        if self.items.len() == MAX_SELECTION {
            let pair = [self.items[0], self.items[1]];
            self.items.clear();
            SelectionOutcome::Completed(pair)
        } else {
            SelectionOutcome::Added
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.items.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

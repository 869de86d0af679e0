use serde::Serialize;

/// Ascending, duplicate-free collection of derived values.
///
/// Sized for facets (distinct locations or concert dates), so a sorted `Vec`
/// with binary-search insertion is enough.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct SortedIndex<T> {
    values: Vec<T>,
}

impl<T: Ord> SortedIndex<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Inserts `value` unless an equal value is already present.
    /// Returns whether the collection grew.
    pub fn insert_unique(&mut self, value: T) -> bool {
        match self.values.binary_search(&value) {
            Ok(_) => false,
            Err(pos) => {
                self.values.insert(pos, value);
                true
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, value: &T) -> bool {
        self.values.binary_search(value).is_ok()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T: Ord> Default for SortedIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for SortedIndex<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut index = Self::new();
        for value in iter {
            index.insert_unique(value);
        }
        index
    }
}

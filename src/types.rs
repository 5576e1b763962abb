//! Keyed weight collection.

/// An ordered collection of `(key, weight)` pairs.
///
/// Keys are unique by caller convention and are never added or removed by
/// the equalizer; every transformation produces a new set with the same
/// keys in the same order. Insertion order is what makes tie-breaking
/// ("first key encountered") deterministic.
///
/// # Examples
///
/// ```
/// use weight_equalizer::WeightSet;
///
/// let set: WeightSet<&str> = [("a", 1.0), ("b", 2.0)].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get(&"b"), Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightSet<K> {
    entries: Vec<(K, f64)>,
}

impl<K> WeightSet<K> {
    /// Creates a set from existing `(key, weight)` pairs, preserving order.
    pub fn from_entries(entries: Vec<(K, f64)>) -> Self {
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, weight)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over weights in insertion order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.values().sum()
    }

    /// Consumes the set, returning the underlying pairs.
    pub fn into_entries(self) -> Vec<(K, f64)> {
        self.entries
    }

    /// Weights as a contiguous vector, in insertion order.
    pub(crate) fn values_vec(&self) -> Vec<f64> {
        self.values().collect()
    }
}

impl<K: PartialEq> WeightSet<K> {
    /// Looks up the weight for `key` (linear scan; sets are small).
    pub fn get(&self, key: &K) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}

impl<K: Clone> WeightSet<K> {
    /// Pairs this set's keys with replacement weights, in order.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.entries.len());
        Self {
            entries: self
                .entries
                .iter()
                .zip(values)
                .map(|((k, _), v)| (k.clone(), v))
                .collect(),
        }
    }
}

impl<K> FromIterator<(K, f64)> for WeightSet<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K> IntoIterator for WeightSet<K> {
    type Item = (K, f64);
    type IntoIter = std::vec::IntoIter<(K, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

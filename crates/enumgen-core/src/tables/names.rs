//! Packed name storage.
//!
//! All display names live in one NUL-separated blob. A parallel offset table
//! gives the byte position where each name starts, so the generated code can
//! recover any name with a single add and no per-value pointer.
//!
//! ```text
//! blob:    R e d \0 G r e e n \0 I N V A L I D \0
//! offsets: 0        4           10
//! ```

/// Name of the sentinel ordinal placed after the last real value
pub const DEFAULT_SENTINEL_NAME: &str = "INVALID";

/// Concatenated names plus their start offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameBlock {
    blob: String,
    offsets: Vec<usize>,
}

impl NameBlock {
    /// Packs `names` followed by `sentinel_name`.
    ///
    /// Every name, the sentinel included, is followed by one NUL. The offset
    /// table ends with the sentinel's offset, so it always has one more entry
    /// than there are real names.
    pub fn pack<'a, I>(names: I, sentinel_name: &'a str) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut blob = String::new();
        let mut offsets = Vec::new();

        for name in names.into_iter().chain(std::iter::once(sentinel_name)) {
            offsets.push(blob.len());
            blob.push_str(name);
            blob.push('\0');
        }

        Self { blob, offsets }
    }

    /// The raw blob, NUL terminators included
    pub fn blob(&self) -> &str {
        &self.blob
    }

    /// Start offset of every name, sentinel last
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of real names (excludes the sentinel)
    pub fn count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the name stored at `ordinal`.
    ///
    /// The sentinel ordinal yields the sentinel name; anything past it is
    /// `None`.
    pub fn name(&self, ordinal: usize) -> Option<&str> {
        let start = *self.offsets.get(ordinal)?;
        self.blob[start..].split('\0').next()
    }

    /// Finds the ordinal of `name`, scanning real names in order.
    ///
    /// Returns the sentinel ordinal when nothing matches. The sentinel name
    /// itself is never matched.
    pub fn lookup(&self, name: &str) -> usize {
        (0..self.count())
            .find(|&ordinal| self.name(ordinal) == Some(name))
            .unwrap_or_else(|| self.count())
    }

    /// Iterates over the stored names, sentinel last
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.offsets.len()).filter_map(move |ordinal| self.name(ordinal))
    }
}

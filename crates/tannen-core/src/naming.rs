//! Slot naming scheme
//!
//! Both persistence paths store photos under the same fixed names: the top
//! (cover) photo is always `top.jpg`, body photos are `1.jpg`, `2.jpg`, …
//! forming a dense 1-based sequence. Name generation and parsing are
//! centralised here so the endpoint, the bucket client, and the intake flow
//! never disagree about a key.

use std::cmp::Ordering;
use std::fmt;

/// Storage name of the top (cover) photo.
pub const TOP_FILE_NAME: &str = "top.jpg";

/// Extension every stored photo uses, regardless of the source file.
pub const PHOTO_EXTENSION: &str = "jpg";

/// The canonical storage key of a photo slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotName {
    /// The single cover photo at the apex of the tree.
    Top,
    /// A body photo; the index is 1-based.
    Body(u32),
}

impl SlotName {
    /// Slot name for the body photo at 1-based index `index`.
    ///
    /// Index 0 never names a slot; callers derive indices from sequence
    /// positions, which start at 1.
    pub fn body(index: u32) -> Self {
        debug_assert!(index >= 1, "body slots are 1-based");
        SlotName::Body(index)
    }

    /// File name this slot is stored under (`top.jpg`, `1.jpg`, …).
    pub fn file_name(&self) -> String {
        match self {
            SlotName::Top => TOP_FILE_NAME.to_string(),
            SlotName::Body(n) => format!("{}.{}", n, PHOTO_EXTENSION),
        }
    }

    /// Parse a stored file name back into a slot name.
    ///
    /// Returns `None` for anything outside the naming scheme, which lets
    /// listings skip unrelated files in a shared directory.
    pub fn parse(name: &str) -> Option<Self> {
        if name == TOP_FILE_NAME {
            return Some(SlotName::Top);
        }
        let stem = name.strip_suffix(".jpg")?;
        let index: u32 = stem.parse().ok()?;
        if index == 0 {
            return None;
        }
        Some(SlotName::Body(index))
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

// Top sorts before all body slots; body slots sort by index. Listings rely
// on this to render the tree in display order.
impl Ord for SlotName {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SlotName::Top, SlotName::Top) => Ordering::Equal,
            (SlotName::Top, SlotName::Body(_)) => Ordering::Less,
            (SlotName::Body(_), SlotName::Top) => Ordering::Greater,
            (SlotName::Body(a), SlotName::Body(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for SlotName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// True when `names` contains exactly the body slots `1..=n` for some `n`
/// (top photos are ignored). Used by tests and by listings to detect gaps.
pub fn body_sequence_is_dense<'a, I>(names: I) -> bool
where
    I: IntoIterator<Item = &'a SlotName>,
{
    let mut indices: Vec<u32> = names
        .into_iter()
        .filter_map(|name| match name {
            SlotName::Body(n) => Some(*n),
            SlotName::Top => None,
        })
        .collect();
    indices.sort_unstable();
    indices
        .iter()
        .enumerate()
        .all(|(i, &n)| n == (i as u32) + 1)
}

//! Instruction class identifiers and compact class sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Size of the instruction-class index space. Classes are numbered `1..=49`.
pub const CLASS_COUNT: u8 = 49;

/// Raw class number outside `1..=CLASS_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("class id {0} outside 1..={}", CLASS_COUNT)]
pub struct InvalidClassId(pub u32);

/// Index of one instruction class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ClassId(u8);

impl ClassId {
    pub fn new(raw: u32) -> Result<Self, InvalidClassId> {
        match u8::try_from(raw) {
            Ok(id) if (1..=CLASS_COUNT).contains(&id) => Ok(Self(id)),
            _ => Err(InvalidClassId(raw)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every class id in ascending order.
    pub fn all() -> impl Iterator<Item = ClassId> {
        (1..=CLASS_COUNT).map(ClassId)
    }
}

impl TryFrom<u32> for ClassId {
    type Error = InvalidClassId;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        ClassId::new(raw)
    }
}

impl From<ClassId> for u32 {
    fn from(id: ClassId) -> u32 {
        u32::from(id.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subset of the class index space, one bit per class (bit `n` is class `n`).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ClassId>", into = "Vec<ClassId>")]
pub struct ClassSet(u64);

impl ClassSet {
    const FULL: u64 = ((1u64 << CLASS_COUNT) - 1) << 1;

    pub const fn empty() -> Self {
        Self(0)
    }

    /// All `CLASS_COUNT` classes.
    pub const fn full() -> Self {
        Self(Self::FULL)
    }

    pub fn insert(&mut self, id: ClassId) {
        self.0 |= 1u64 << id.0;
    }

    pub fn remove(&mut self, id: ClassId) {
        self.0 &= !(1u64 << id.0);
    }

    pub fn contains(&self, id: ClassId) -> bool {
        self.0 & (1u64 << id.0) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_subset(&self, other: &ClassSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn union(&self, other: &ClassSet) -> ClassSet {
        ClassSet(self.0 | other.0)
    }

    pub fn difference(&self, other: &ClassSet) -> ClassSet {
        ClassSet(self.0 & !other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = ClassId> + '_ {
        ClassId::all().filter(move |id| self.contains(*id))
    }
}

impl FromIterator<ClassId> for ClassSet {
    fn from_iter<I: IntoIterator<Item = ClassId>>(iter: I) -> Self {
        let mut set = ClassSet::empty();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl From<Vec<ClassId>> for ClassSet {
    fn from(ids: Vec<ClassId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<ClassSet> for Vec<ClassId> {
    fn from(set: ClassSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(ClassId::get)).finish()
    }
}

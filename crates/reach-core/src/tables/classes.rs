//! Instruction class catalog and downstream target footprints.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use reach_types::{ClassId, ClassSet, CLASS_COUNT};

use crate::error::TableError;

/// Pruning behaviour of an instruction class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// Structural core; never pruned.
    Kernel,
    /// No middle requirement; never pruned.
    Atomic,
    /// Pruned when none of its required middles are legal.
    Decomposable,
}

impl ClassKind {
    fn label(self) -> &'static str {
        match self {
            ClassKind::Kernel => "kernel",
            ClassKind::Atomic => "atomic",
            ClassKind::Decomposable => "decomposable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionClass {
    id: ClassId,
    kind: ClassKind,
    middles: BTreeSet<String>,
}

impl InstructionClass {
    pub fn kernel(id: ClassId) -> Self {
        Self {
            id,
            kind: ClassKind::Kernel,
            middles: BTreeSet::new(),
        }
    }

    pub fn atomic(id: ClassId) -> Self {
        Self {
            id,
            kind: ClassKind::Atomic,
            middles: BTreeSet::new(),
        }
    }

    pub fn decomposable<I, S>(id: ClassId, middles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            kind: ClassKind::Decomposable,
            middles: middles.into_iter().map(Into::into).collect(),
        }
    }

    /// Unchecked combination of kind and requirement; the catalog validates it.
    pub fn with_kind<I, S>(id: ClassId, kind: ClassKind, middles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            kind,
            middles: middles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Required middles; empty unless decomposable.
    pub fn middles(&self) -> &BTreeSet<String> {
        &self.middles
    }

    pub fn is_prunable(&self) -> bool {
        self.kind == ClassKind::Decomposable
    }
}

/// Exactly one definition for every class in `1..=CLASS_COUNT`, indexed by id.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ClassCatalog {
    classes: Vec<InstructionClass>,
}

impl ClassCatalog {
    pub fn new(mut classes: Vec<InstructionClass>) -> Result<Self, TableError> {
        let mut seen = ClassSet::empty();
        for class in &classes {
            if seen.contains(class.id) {
                return Err(TableError::DuplicateClass(class.id.get()));
            }
            seen.insert(class.id);

            match class.kind {
                ClassKind::Decomposable if class.middles.is_empty() => {
                    return Err(TableError::EmptyRequirement(class.id.get()));
                }
                ClassKind::Kernel | ClassKind::Atomic if !class.middles.is_empty() => {
                    return Err(TableError::UnexpectedRequirement {
                        id: class.id.get(),
                        kind: class.kind.label(),
                    });
                }
                _ => {}
            }
        }

        let missing = ClassSet::full().difference(&seen);
        if !missing.is_empty() {
            return Err(TableError::MissingClasses(
                missing.iter().map(ClassId::get).collect(),
            ));
        }

        classes.sort_by_key(|c| c.id);
        Ok(Self { classes })
    }

    pub fn get(&self, id: ClassId) -> &InstructionClass {
        &self.classes[usize::from(id.get()) - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstructionClass> {
        self.classes.iter()
    }

    pub fn decomposable(&self) -> impl Iterator<Item = &InstructionClass> {
        self.classes.iter().filter(|c| c.is_prunable())
    }

    /// Kernel and atomic classes: the floor no vocabulary can prune.
    pub fn floor(&self) -> ClassSet {
        self.classes
            .iter()
            .filter(|c| !c.is_prunable())
            .map(|c| c.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.classes.len(), usize::from(CLASS_COUNT));
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Downstream procedural target and its required-class footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    id: String,
    footprint: ClassSet,
}

impl Target {
    pub fn new(id: impl Into<String>, footprint: ClassSet) -> Self {
        Self {
            id: id.into(),
            footprint,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn footprint(&self) -> ClassSet {
        self.footprint
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TargetCatalog {
    targets: Vec<Target>,
}

impl TargetCatalog {
    pub fn new(targets: Vec<Target>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for target in &targets {
            if !seen.insert(target.id.as_str()) {
                return Err(TableError::DuplicateTarget(target.id.clone()));
            }
        }
        Ok(Self { targets })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

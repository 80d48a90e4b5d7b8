//! Token class hierarchy
//!
//! Classes are interned as small integers. Each class carries a bitset of
//! its ancestors (itself included), so ancestor queries are a single bit
//! test.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use smallvec::SmallVec;

use crate::error::{Result, TokenizerError};

/// Interned token class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u16);

impl ClassId {
    /// Index of this class in its hierarchy
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

type AncestorSet = SmallVec<[u64; 2]>;

/// Closed, profile-defined class taxonomy with a single root
#[derive(Debug, Clone)]
pub struct TokenClasses {
    names: Vec<String>,
    ids: HashMap<String, ClassId>,
    ancestors: Vec<AncestorSet>,
}

impl TokenClasses {
    /// Build the hierarchy from its root and a child → parent map
    ///
    /// Every class named in `parents` (as key or value) becomes part of the
    /// hierarchy. Classes without a parent hang directly below the root.
    pub fn new(root: &str, parents: &BTreeMap<String, String>) -> Result<Self> {
        if root.is_empty() {
            return Err(TokenizerError::Configuration(
                "class hierarchy has no root".to_string(),
            ));
        }
        if let Some(parent) = parents.get(root) {
            return Err(TokenizerError::Configuration(format!(
                "root class {root} must not have a parent (found {parent})"
            )));
        }

        let mut others = BTreeSet::new();
        for (child, parent) in parents {
            others.insert(child.as_str());
            others.insert(parent.as_str());
        }
        others.remove(root);

        let mut names = Vec::with_capacity(others.len() + 1);
        names.push(root.to_string());
        names.extend(others.into_iter().map(str::to_string));
        if names.len() > u16::MAX as usize {
            return Err(TokenizerError::Configuration(format!(
                "too many token classes ({})",
                names.len()
            )));
        }

        let ids: HashMap<String, ClassId> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), ClassId(i as u16)))
            .collect();

        let words = names.len().div_ceil(64);
        let mut ancestors = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let mut set: AncestorSet = SmallVec::from_elem(0, words);
            // the root is ancestor of every class
            set[0] |= 1;
            let mut current = index;
            let mut current_name = name.as_str();
            loop {
                let word = &mut set[current / 64];
                let bit = 1u64 << (current % 64);
                if current != 0 && *word & bit != 0 {
                    return Err(TokenizerError::Configuration(format!(
                        "cycle in class hierarchy at {current_name}"
                    )));
                }
                *word |= bit;
                match parents.get(current_name) {
                    Some(parent) => {
                        current = ids[parent].index();
                        current_name = parent.as_str();
                    }
                    None => break,
                }
            }
            ancestors.push(set);
        }

        Ok(Self {
            names,
            ids,
            ancestors,
        })
    }

    /// The root class
    #[inline]
    pub fn root(&self) -> ClassId {
        ClassId(0)
    }

    /// Look up a class by name
    pub fn id(&self, name: &str) -> Option<ClassId> {
        self.ids.get(name).copied()
    }

    /// Look up a class by name, failing for unknown names
    pub fn require(&self, name: &str) -> Result<ClassId> {
        self.id(name)
            .ok_or_else(|| TokenizerError::UndefinedClassTag(name.to_string()))
    }

    /// Name of a class
    pub fn name(&self, id: ClassId) -> &str {
        self.names.get(id.index()).map_or("", String::as_str)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `ancestor` is `class` or one of its ancestors
    #[inline]
    pub fn is_ancestor_or_self(&self, ancestor: ClassId, class: ClassId) -> bool {
        let a = ancestor.index();
        self.ancestors
            .get(class.index())
            .and_then(|set| set.get(a / 64))
            .is_some_and(|word| word & (1 << (a % 64)) != 0)
    }

    /// Name-based ancestor query
    pub fn is_ancestor(&self, ancestor: &str, class: &str) -> Result<bool> {
        let ancestor = self.require(ancestor)?;
        let class = self.require(class)?;
        Ok(self.is_ancestor_or_self(ancestor, class))
    }

    /// All class names in id order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

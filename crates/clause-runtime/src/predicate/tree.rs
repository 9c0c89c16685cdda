//! Condition fragments and the folded condition tree

use super::Predicate;
use clause_core::{CombinationMode, Join, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A predicate plus the mode it was built under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionFragment {
    pub predicate: Predicate,
    pub mode: CombinationMode,
}

impl ConditionFragment {
    pub fn new(predicate: Predicate, mode: CombinationMode) -> Self {
        Self { predicate, mode }
    }

    /// The predicate as it joins the tree, negated for the NOT modes
    pub fn into_operand(self) -> Predicate {
        if self.mode.is_negated() {
            self.predicate.negate()
        } else {
            self.predicate
        }
    }
}

/// Left-to-right fold of all fragments; empty means "no constraint"
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionTree {
    root: Option<Predicate>,
}

impl ConditionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one fragment into the tree
    ///
    /// The first fragment becomes the root whatever its join. Later fragments
    /// wrap the accumulated root: `And([acc, f])` or `Or([acc, f])`. Nodes are
    /// never flattened or reordered.
    pub fn fold(&mut self, fragment: ConditionFragment) {
        let join = fragment.mode.join();
        let operand = fragment.into_operand();

        self.root = Some(match self.root.take() {
            None => operand,
            Some(acc) => match join {
                Join::And => Predicate::And(vec![acc, operand]),
                Join::Or => Predicate::Or(vec![acc, operand]),
            },
        });
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Predicate> {
        self.root.as_ref()
    }

    pub fn into_root(self) -> Option<Predicate> {
        self.root
    }

    /// Evaluate against a record; an empty tree matches everything
    pub fn matches(&self, record: &HashMap<String, Value>) -> bool {
        self.root.as_ref().map_or(true, |root| root.matches(record))
    }
}

impl FromIterator<ConditionFragment> for ConditionTree {
    fn from_iter<I: IntoIterator<Item = ConditionFragment>>(iter: I) -> Self {
        let mut tree = ConditionTree::new();
        for fragment in iter {
            tree.fold(fragment);
        }
        tree
    }
}

impl fmt::Display for ConditionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => write!(f, "(no constraint)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::CompareOp;

    fn leaf(column: &str) -> Predicate {
        Predicate::compare(column, CompareOp::Eq, Value::Number(1.0))
    }

    fn fragment(column: &str, mode: CombinationMode) -> ConditionFragment {
        ConditionFragment::new(leaf(column), mode)
    }

    #[test]
    fn test_empty_tree() {
        let tree = ConditionTree::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.to_string(), "(no constraint)");
        assert!(tree.matches(&HashMap::new()));
    }

    #[test]
    fn test_first_fragment_becomes_root() {
        for mode in [CombinationMode::And, CombinationMode::Or] {
            let mut tree = ConditionTree::new();
            tree.fold(fragment("a", mode));
            assert_eq!(tree.root(), Some(&leaf("a")));
        }

        let mut tree = ConditionTree::new();
        tree.fold(fragment("a", CombinationMode::OrNot));
        assert_eq!(tree.into_root(), Some(leaf("a").negate()));
    }

    #[test]
    fn test_fold_is_left_to_right() {
        let tree: ConditionTree = vec![
            fragment("a", CombinationMode::And),
            fragment("b", CombinationMode::Or),
            fragment("c", CombinationMode::AndNot),
        ]
        .into_iter()
        .collect();

        let expected = Predicate::And(vec![
            Predicate::Or(vec![leaf("a"), leaf("b")]),
            leaf("c").negate(),
        ]);
        assert_eq!(tree.root(), Some(&expected));
    }
}

//! # viosync-group
//!
//! **Tier 1 (Grouping)**
//!
//! Partitions a flat violation list into [`GroupedUnit`]s by an ordered list
//! of key fields.
//!
//! Grouping builds an explicit tree whose depth equals the number of key
//! fields. Level `d` branches on the value of key field `d`; the last level
//! holds the records. A depth-first walk then emits one unit per leaf.
//!
//! Ordering rules:
//! - Siblings are visited in first-seen order, so units come out in the
//!   order their key-path first appears in the report.
//! - Records keep their report order inside a unit.

use std::collections::HashMap;

use viosync_types::{FlatRecord, GroupedUnit, KeyFieldList, KeyPath, SyncResult};

/// Group `records` by `key_fields`.
///
/// Fails with a data error on the first record whose key fields cannot be
/// read; no record is ever dropped.
pub fn group_violations<I>(records: I, key_fields: &KeyFieldList) -> SyncResult<Vec<GroupedUnit>>
where
    I: IntoIterator<Item = FlatRecord>,
{
    let mut tree = GroupingTree::new(key_fields.clone());
    for record in records {
        tree.insert(record)?;
    }
    Ok(tree.into_units())
}

/// Like [`group_violations`] but takes raw field names.
///
/// An empty field list is a configuration error, raised before any record
/// is looked at.
pub fn group_by_fields<I>(records: I, key_fields: &[String]) -> SyncResult<Vec<GroupedUnit>>
where
    I: IntoIterator<Item = FlatRecord>,
{
    let key_fields = KeyFieldList::new(key_fields.iter().cloned())?;
    group_violations(records, &key_fields)
}

/// Read the key-path of a single record.
pub fn key_path_of(record: &FlatRecord, key_fields: &KeyFieldList) -> SyncResult<KeyPath> {
    key_fields
        .iter()
        .map(|field| record.key_component(field))
        .collect::<SyncResult<Vec<_>>>()
        .map(KeyPath::new)
}

/// A tree node: interior levels branch, the last level holds records.
#[derive(Debug)]
enum Node {
    Branch(Branch),
    Leaf(Vec<FlatRecord>),
}

/// Children keyed by component value, kept in first-seen order.
#[derive(Debug, Default)]
struct Branch {
    children: Vec<(String, Node)>,
    index: HashMap<String, usize>,
}

impl Branch {
    fn child_or_insert_with(&mut self, value: String, make: impl FnOnce() -> Node) -> &mut Node {
        let slot = match self.index.get(&value) {
            Some(&slot) => slot,
            None => {
                let slot = self.children.len();
                self.index.insert(value.clone(), slot);
                self.children.push((value, make()));
                slot
            }
        };
        &mut self.children[slot].1
    }
}

/// Incremental grouping tree over a fixed key-field list.
#[derive(Debug)]
pub struct GroupingTree {
    key_fields: KeyFieldList,
    root: Branch,
    records: usize,
}

impl GroupingTree {
    pub fn new(key_fields: KeyFieldList) -> Self {
        Self {
            key_fields,
            root: Branch::default(),
            records: 0,
        }
    }

    pub fn key_fields(&self) -> &KeyFieldList {
        &self.key_fields
    }

    /// Number of records inserted so far.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Number of distinct key-paths seen so far.
    pub fn unit_count(&self) -> usize {
        fn leaves(branch: &Branch) -> usize {
            branch
                .children
                .iter()
                .map(|(_, node)| match node {
                    Node::Branch(inner) => leaves(inner),
                    Node::Leaf(_) => 1,
                })
                .sum()
        }
        leaves(&self.root)
    }

    /// File one record under its key-path.
    pub fn insert(&mut self, record: FlatRecord) -> SyncResult<()> {
        let key_path = key_path_of(&record, &self.key_fields)?;
        let depth = key_path.len();

        let mut branch = &mut self.root;
        for (level, value) in key_path.components().iter().enumerate() {
            let last = level + 1 == depth;
            let node = branch.child_or_insert_with(value.clone(), || {
                if last {
                    Node::Leaf(Vec::new())
                } else {
                    Node::Branch(Branch::default())
                }
            });
            match node {
                Node::Branch(next) => branch = next,
                Node::Leaf(records) => {
                    records.push(record);
                    self.records += 1;
                    return Ok(());
                }
            }
        }

        // KeyFieldList is never empty, and every level below the last is a branch.
        unreachable!("grouping tree ended without a leaf at depth {depth}")
    }

    /// Flatten the tree depth-first into grouped units.
    pub fn into_units(self) -> Vec<GroupedUnit> {
        let mut units = Vec::new();
        let mut prefix = Vec::with_capacity(self.key_fields.len());
        flatten(self.root, &mut prefix, &mut units);
        units
    }
}

fn flatten(branch: Branch, prefix: &mut Vec<String>, out: &mut Vec<GroupedUnit>) {
    for (value, node) in branch.children {
        prefix.push(value);
        match node {
            Node::Branch(inner) => flatten(inner, prefix, out),
            Node::Leaf(records) => out.push(GroupedUnit {
                key_path: KeyPath::new(prefix.clone()),
                records,
            }),
        }
        prefix.pop();
    }
}

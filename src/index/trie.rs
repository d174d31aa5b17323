// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded-depth prefix index.
//!
//! A trie that only branches on the first `max_depth` characters of a phrase.
//! Past the bound, phrases that share the truncated prefix pile up in one leaf
//! bucket and lookups scan that bucket linearly. Memory stays proportional to
//! the number of distinct short prefixes instead of the total phrase length.
//!
//! # Layout
//!
//! ```text
//! max_depth = 2, phrases: "ab", "abc", "abd", "abdx", "b"
//!
//! root ─ 'a' ─ 'b' ─┬─ End  → ["ab"]
//!                   ├─ 'c'  → ["abc"]
//!                   └─ 'd'  → ["abd", "abdx"]
//!      └ 'b' ─ End  → ["b"]
//! ```
//!
//! Nodes live in an arena and refer to each other by index. Each node is a
//! branch or a leaf bucket, never both. A word that ends before the bound gets
//! an `End` bucket under its last branch so it stays reachable next to longer
//! siblings that share its prefix.
//!
//! Arena slots are reference counted. [`PrefixIndex::with_inserted`] clones the
//! slot table (pointer copies) and only the nodes actually modified by the
//! insertion get duplicated; everything else stays shared with the source.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::util::normalize;

/// Default number of characters the trie branches on.
pub const DEFAULT_MAX_DEPTH: usize = 3;

type NodeId = usize;

const ROOT: NodeId = 0;

/// Child key inside a branch node.
///
/// `End` sorts before every character so flattened results list the short
/// word before its longer siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Sentinel: the word ended here but the branch continues.
    End,
    Char(char),
}

#[derive(Debug, Clone)]
enum Node {
    Branch(BTreeMap<Key, NodeId>),
    Leaf(Vec<String>),
}

#[derive(Clone, Copy)]
enum Shape {
    Branch,
    Leaf,
}

impl Shape {
    fn empty(self) -> Node {
        match self {
            Shape::Branch => Node::Branch(BTreeMap::new()),
            Shape::Leaf => Node::Leaf(Vec::new()),
        }
    }
}

/// Bounded-depth trie over normalized phrases.
#[derive(Debug, Clone)]
pub struct PrefixIndex {
    max_depth: usize,
    nodes: Vec<Arc<Node>>,
    entries: usize,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex {
    /// Empty index with [`DEFAULT_MAX_DEPTH`].
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_MAX_DEPTH)
    }

    /// Empty index with the given depth.
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            nodes: vec![Arc::new(Node::Branch(BTreeMap::new()))],
            entries: 0,
        }
    }

    /// Empty index from an untrusted (e.g. configured) depth.
    ///
    /// Fails with [`Error::InvalidDepth`] when `max_depth` is negative.
    pub fn with_max_depth(max_depth: i64) -> Result<Self> {
        let depth = usize::try_from(max_depth).map_err(|_| Error::InvalidDepth(max_depth))?;
        Ok(Self::with_depth(depth))
    }

    /// Build an index from phrases, inserting in place.
    pub fn from_phrases<I, S>(phrases: I, max_depth: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::with_depth(max_depth);
        index.insert_batch(phrases);
        index
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of distinct phrases stored.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Insert a phrase, mutating this index.
    ///
    /// Returns `false` when the normalized phrase is empty or already stored.
    pub fn insert(&mut self, phrase: &str) -> bool {
        let normalized = normalize(phrase);
        if normalized.is_empty() {
            return false;
        }

        let chars: Vec<char> = normalized.chars().collect();
        let last = chars.len() - 1;
        let stop = last.min(self.max_depth);

        let mut node = ROOT;
        for &ch in &chars[..stop] {
            node = self.child_or_insert(node, Key::Char(ch), Shape::Branch);
        }

        let bucket = if last < self.max_depth {
            // Word ends before the bound: park it under End so longer words can keep branching.
            let branch = self.child_or_insert(node, Key::Char(chars[last]), Shape::Branch);
            self.child_or_insert(branch, Key::End, Shape::Leaf)
        } else {
            self.child_or_insert(node, Key::Char(chars[self.max_depth]), Shape::Leaf)
        };

        self.push_phrase(bucket, normalized)
    }

    /// Insert a phrase into a copy of this index, leaving `self` untouched.
    pub fn with_inserted(&self, phrase: &str) -> Self {
        let mut next = self.clone();
        next.insert(phrase);
        next
    }

    /// Insert every phrase in place. Returns how many were new.
    pub fn insert_batch<I, S>(&mut self, phrases: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        phrases
            .into_iter()
            .filter(|phrase| self.insert(phrase.as_ref()))
            .count()
    }

    /// Insert every phrase into a single copy of this index.
    pub fn with_batch<I, S>(&self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = self.clone();
        next.insert_batch(phrases);
        next
    }

    /// All stored phrases that may start with `prefix`.
    ///
    /// Prefixes no longer than the depth bound return exactly the phrases that
    /// start with them (the whole subtree). Longer prefixes return the single
    /// leaf bucket for the first `max_depth + 1` characters, which can include
    /// phrases that diverge after that; callers that need exact prefix
    /// semantics filter with `starts_with`.
    pub fn get_prefix_matches(&self, prefix: &str) -> Vec<String> {
        let normalized = normalize(prefix);
        let chars: Vec<char> = normalized.chars().collect();
        let walk = chars.len().min(self.max_depth);

        let mut node = ROOT;
        for &ch in &chars[..walk] {
            match self.child(node, Key::Char(ch)) {
                Some(id) => node = id,
                None => return Vec::new(),
            }
        }

        if chars.len() <= self.max_depth {
            return self.flatten(node);
        }

        match self.child(node, Key::Char(chars[self.max_depth])) {
            Some(id) => match &*self.nodes[id] {
                Node::Leaf(phrases) => phrases.clone(),
                Node::Branch(_) => self.flatten(id),
            },
            None => Vec::new(),
        }
    }

    /// Is this exact phrase stored? Prefix reachability alone is not enough.
    pub fn contains(&self, phrase: &str) -> bool {
        let normalized = normalize(phrase);
        !normalized.is_empty() && self.get_prefix_matches(&normalized).contains(&normalized)
    }

    /// Every stored phrase, in trie order.
    pub fn phrases(&self) -> Vec<String> {
        self.flatten(ROOT)
    }

    /// Number of arena slots whose node is physically shared with `other`.
    #[doc(hidden)]
    pub fn shared_nodes(&self, other: &PrefixIndex) -> usize {
        self.nodes
            .iter()
            .zip(&other.nodes)
            .filter(|(a, b)| Arc::ptr_eq(a, b))
            .count()
    }

    fn child(&self, parent: NodeId, key: Key) -> Option<NodeId> {
        match &*self.nodes[parent] {
            Node::Branch(children) => children.get(&key).copied(),
            Node::Leaf(_) => None,
        }
    }

    fn child_or_insert(&mut self, parent: NodeId, key: Key, shape: Shape) -> NodeId {
        if let Some(id) = self.child(parent, key) {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(Arc::new(shape.empty()));
        if let Node::Branch(children) = Arc::make_mut(&mut self.nodes[parent]) {
            children.insert(key, id);
        }
        id
    }

    fn push_phrase(&mut self, bucket: NodeId, phrase: String) -> bool {
        if let Node::Leaf(phrases) = &*self.nodes[bucket] {
            if phrases.contains(&phrase) {
                return false;
            }
        }

        match Arc::make_mut(&mut self.nodes[bucket]) {
            Node::Leaf(phrases) => {
                phrases.push(phrase);
                self.entries += 1;
                true
            }
            Node::Branch(_) => false,
        }
    }

    /// Collect every bucket below `start` with an explicit worklist.
    fn flatten(&self, start: NodeId) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            match &*self.nodes[id] {
                Node::Leaf(phrases) => out.extend(phrases.iter().cloned()),
                // Reverse so the smallest key is popped first.
                Node::Branch(children) => stack.extend(children.values().rev().copied()),
            }
        }

        out
    }
}

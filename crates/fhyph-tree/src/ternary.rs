#![forbid(unsafe_code)]

//! Ternary search tree over `char` keys with `u32` values.
//!
//! Nodes live in parallel arrays indexed by a dense `u32` id. Id 0 is the
//! "no child" marker, so real nodes start at 1 and the first node ever
//! allocated is the root.
//!
//! # Node kinds
//!
//! ```text
//! split[p] = c (a char)   regular node: low/high hold siblings, equal continues the key
//! split[p] = TERMINATOR   a key ends here; equal[p] is its value
//! split[p] = COMPRESSED   the rest of a key is stored in `suffixes` at low[p];
//!                         equal[p] is its value
//! ```
//!
//! A fresh branch is always created as a single compressed node, so a
//! unique key costs one node no matter how long its tail is. When a later
//! key shares the tail, the compressed node is split one character at a
//! time during insertion.
//!
//! Keys are `&[char]`; reading past the end of the slice yields
//! [`TERMINATOR`], so keys must not contain `'\0'`.

use rustc_hash::FxHashMap;

/// Child id meaning "none".
pub const NIL: u32 = 0;
/// Split value of a node where a key ends.
pub const TERMINATOR: u32 = 0;
/// Split value of a compressed branch.
pub const COMPRESSED: u32 = u32::MAX;

const SUFFIX_END: char = '\0';

#[inline]
fn key_at(key: &[char], i: usize) -> u32 {
    key.get(i).map_or(TERMINATOR, |&c| c as u32)
}

/// Compact ordered map from `char` strings to small integers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TernaryTree {
    split: Vec<u32>,
    low: Vec<u32>,
    high: Vec<u32>,
    equal: Vec<u32>,
    /// NUL-terminated key tails of compressed nodes; offset 0 is reserved.
    suffixes: Vec<char>,
    root: u32,
    len: usize,
}

/// Parent link to rewrite while descending during insertion.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    Low(usize),
    High(usize),
    Equal(usize),
}

/// A stored key found by [`TernaryTree::prefix_matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    /// Value stored under the matched key.
    pub value: u32,
    /// Index in the searched key one past the last matched char.
    pub end: usize,
}

impl TernaryTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            split: vec![TERMINATOR],
            low: vec![NIL],
            high: vec![NIL],
            equal: vec![NIL],
            suffixes: vec![SUFFIX_END],
            root: NIL,
            len: 0,
        }
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated nodes, not counting the reserved id 0.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.split.len() - 1
    }

    /// Length of the compressed suffix buffer in chars.
    #[must_use]
    pub fn suffix_len(&self) -> usize {
        self.suffixes.len()
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Insert `key` with `value`, replacing the value of an identical key.
    pub fn insert(&mut self, key: &str, value: u32) {
        let chars: Vec<char> = key.chars().collect();
        self.insert_chars(&chars, value);
    }

    /// Insert a key given as chars.
    pub fn insert_chars(&mut self, key: &[char], value: u32) {
        debug_assert!(!key.contains(&SUFFIX_END), "keys must not contain NUL");
        let mut slot = Slot::Root;
        let mut i = 0;

        loop {
            let p = self.read_slot(slot);
            if p == NIL {
                let node = self.new_branch(&key[i..], value);
                self.write_slot(slot, node);
                self.len += 1;
                return;
            }
            let p = p as usize;

            if self.split[p] == COMPRESSED {
                if i == key.len() {
                    // The new key ends where the compressed tail starts:
                    // turn `p` into the terminal and hang the tail off `high`.
                    let tail = self.alloc(COMPRESSED, self.low[p], self.equal[p], NIL);
                    self.split[p] = TERMINATOR;
                    self.low[p] = NIL;
                    self.equal[p] = value;
                    self.high[p] = tail;
                    self.len += 1;
                    return;
                }
                self.expand(p);
            }

            let c = key_at(key, i);
            let s = self.split[p];
            if c < s {
                slot = Slot::Low(p);
            } else if c > s {
                slot = Slot::High(p);
            } else if c == TERMINATOR {
                self.equal[p] = value;
                return;
            } else {
                slot = Slot::Equal(p);
                i += 1;
            }
        }
    }

    /// Peel the first char off the compressed node `p`, leaving `p` a
    /// regular node whose `equal` child carries the rest.
    fn expand(&mut self, p: usize) {
        let at = self.low[p] as usize;
        let first = self.suffixes[at];
        let rest = at + 1;
        let child = if self.suffixes[rest] == SUFFIX_END {
            self.alloc(TERMINATOR, NIL, self.equal[p], NIL)
        } else {
            self.alloc(COMPRESSED, rest as u32, self.equal[p], NIL)
        };
        self.split[p] = first as u32;
        self.low[p] = NIL;
        self.equal[p] = child;
    }

    fn new_branch(&mut self, tail: &[char], value: u32) -> u32 {
        if tail.is_empty() {
            return self.alloc(TERMINATOR, NIL, value, NIL);
        }
        let at = self.suffixes.len() as u32;
        self.suffixes.extend_from_slice(tail);
        self.suffixes.push(SUFFIX_END);
        self.alloc(COMPRESSED, at, value, NIL)
    }

    fn alloc(&mut self, split: u32, low: u32, equal: u32, high: u32) -> u32 {
        let id = self.split.len() as u32;
        self.split.push(split);
        self.low.push(low);
        self.equal.push(equal);
        self.high.push(high);
        id
    }

    fn read_slot(&self, slot: Slot) -> u32 {
        match slot {
            Slot::Root => self.root,
            Slot::Low(p) => self.low[p],
            Slot::High(p) => self.high[p],
            Slot::Equal(p) => self.equal[p],
        }
    }

    fn write_slot(&mut self, slot: Slot, node: u32) {
        match slot {
            Slot::Root => self.root = node,
            Slot::Low(p) => self.low[p] = node,
            Slot::High(p) => self.high[p] = node,
            Slot::Equal(p) => self.equal[p] = node,
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Value stored under `key`.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<u32> {
        let chars: Vec<char> = key.chars().collect();
        self.find_chars(&chars)
    }

    /// Value stored under a key given as chars.
    #[must_use]
    pub fn find_chars(&self, key: &[char]) -> Option<u32> {
        let mut p = self.root;
        let mut i = 0;
        while p != NIL {
            let n = p as usize;
            let s = self.split[n];
            if s == COMPRESSED {
                return (self.suffix_cmp(self.low[n], &key[i..]) == SuffixCmp::Equal)
                    .then_some(self.equal[n]);
            }
            let c = key_at(key, i);
            if c == s {
                if c == TERMINATOR {
                    return Some(self.equal[n]);
                }
                i += 1;
                p = self.equal[n];
            } else if c < s {
                p = self.low[n];
            } else {
                p = self.high[n];
            }
        }
        None
    }

    /// Every stored key that is a prefix of `key[start..]`, shortest first.
    ///
    /// Unlike [`find_chars`](Self::find_chars) this reports all matches on
    /// the path, not only a full-key hit.
    #[must_use]
    pub fn prefix_matches<'t, 'k>(
        &'t self,
        key: &'k [char],
        start: usize,
    ) -> PrefixMatches<'t, 'k> {
        PrefixMatches {
            tree: self,
            key,
            node: self.root,
            pos: start,
        }
    }

    /// Terminal value hanging directly below `p`, if a key ends there.
    ///
    /// TERMINATOR sorts before every char, so it can only sit on the
    /// low chain.
    #[inline]
    fn terminal_at(&self, mut p: u32) -> Option<u32> {
        while p != NIL {
            let n = p as usize;
            match self.split[n] {
                COMPRESSED => return None,
                TERMINATOR => return Some(self.equal[n]),
                _ => p = self.low[n],
            }
        }
        None
    }

    fn suffix_cmp(&self, at: u32, rest: &[char]) -> SuffixCmp {
        let stored = &self.suffixes[at as usize..];
        for (i, &c) in stored.iter().enumerate() {
            if c == SUFFIX_END {
                return if i == rest.len() {
                    SuffixCmp::Equal
                } else {
                    SuffixCmp::Prefix
                };
            }
            if rest.get(i) != Some(&c) {
                return SuffixCmp::Differs;
            }
        }
        SuffixCmp::Differs
    }

    fn suffix_at(&self, at: u32) -> &[char] {
        let stored = &self.suffixes[at as usize..];
        let end = stored
            .iter()
            .position(|&c| c == SUFFIX_END)
            .unwrap_or(stored.len());
        &stored[..end]
    }

    // -----------------------------------------------------------------------
    // Iteration and maintenance
    // -----------------------------------------------------------------------

    /// All `(key, value)` pairs in ascending key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, u32)> {
        #[derive(Clone, Copy)]
        enum Visit {
            Low,
            Equal,
            High,
        }

        let mut out = Vec::with_capacity(self.len);
        let mut prefix: Vec<char> = Vec::new();
        let mut stack = vec![(self.root, 0usize, Visit::Low)];

        while let Some((p, depth, visit)) = stack.pop() {
            if p == NIL {
                continue;
            }
            let n = p as usize;
            prefix.truncate(depth);

            if self.split[n] == COMPRESSED {
                prefix.extend_from_slice(self.suffix_at(self.low[n]));
                out.push((prefix.iter().collect(), self.equal[n]));
                continue;
            }
            match visit {
                Visit::Low => {
                    stack.push((p, depth, Visit::Equal));
                    stack.push((self.low[n], depth, Visit::Low));
                }
                Visit::Equal => {
                    stack.push((p, depth, Visit::High));
                    if self.split[n] == TERMINATOR {
                        out.push((prefix.iter().collect(), self.equal[n]));
                    } else if let Some(c) = char::from_u32(self.split[n]) {
                        prefix.push(c);
                        stack.push((self.equal[n], depth + 1, Visit::Low));
                    }
                }
                Visit::High => stack.push((self.high[n], depth, Visit::Low)),
            }
        }
        out
    }

    /// Rebuild the tree by inserting keys median first.
    ///
    /// Depth then no longer depends on the order keys were inserted in.
    pub fn balance(&mut self) {
        let entries = self.entries();
        *self = Self::new();

        let mut ranges = vec![(0usize, entries.len())];
        while let Some((offset, n)) = ranges.pop() {
            if n == 0 {
                continue;
            }
            let m = n / 2;
            let (key, value) = &entries[offset + m];
            self.insert(key, *value);
            ranges.push((offset + m + 1, n - m - 1));
            ranges.push((offset, m));
        }
    }

    /// Balance, drop spare capacity, and share identical compressed tails.
    pub fn trim_to_size(&mut self) {
        self.balance();

        let mut packed: Vec<char> = vec![SUFFIX_END];
        let mut seen: FxHashMap<Vec<char>, u32> = FxHashMap::default();
        let mut stack = vec![self.root];
        while let Some(p) = stack.pop() {
            if p == NIL {
                continue;
            }
            let n = p as usize;
            if self.split[n] == COMPRESSED {
                let tail = self.suffix_at(self.low[n]).to_vec();
                let at = *seen.entry(tail).or_insert_with_key(|tail| {
                    let at = packed.len() as u32;
                    packed.extend_from_slice(tail);
                    packed.push(SUFFIX_END);
                    at
                });
                self.low[n] = at;
                continue;
            }
            stack.push(self.low[n]);
            if self.split[n] != TERMINATOR {
                stack.push(self.equal[n]);
            }
            stack.push(self.high[n]);
        }

        self.suffixes = packed;
        self.suffixes.shrink_to_fit();
        self.split.shrink_to_fit();
        self.low.shrink_to_fit();
        self.high.shrink_to_fit();
        self.equal.shrink_to_fit();
    }

    /// Structural check for trees that came from outside (e.g. a reload).
    ///
    /// Returns false if any child id or suffix offset would index out of
    /// bounds.
    #[must_use]
    pub fn validate(&self) -> bool {
        let nodes = self.split.len();
        if nodes == 0
            || self.low.len() != nodes
            || self.high.len() != nodes
            || self.equal.len() != nodes
            || self.root as usize >= nodes
            || self.suffixes.last() != Some(&SUFFIX_END)
        {
            return false;
        }
        let in_range = |id: u32| (id as usize) < nodes;
        let in_bounds = (1..nodes).all(|n| match self.split[n] {
            COMPRESSED => (self.low[n] as usize) < self.suffixes.len() && in_range(self.high[n]),
            TERMINATOR => in_range(self.low[n]) && in_range(self.high[n]),
            s => {
                char::from_u32(s).is_some()
                    && in_range(self.low[n])
                    && in_range(self.high[n])
                    && in_range(self.equal[n])
            }
        });
        in_bounds && self.reached_once()
    }

    /// Every node reachable from the root has exactly one parent, so
    /// descents terminate.
    fn reached_once(&self) -> bool {
        let mut seen = vec![false; self.split.len()];
        let mut stack = vec![self.root];
        while let Some(p) = stack.pop() {
            if p == NIL {
                continue;
            }
            let n = p as usize;
            if std::mem::replace(&mut seen[n], true) {
                return false;
            }
            match self.split[n] {
                COMPRESSED => {}
                TERMINATOR => stack.extend([self.low[n], self.high[n]]),
                _ => stack.extend([self.low[n], self.equal[n], self.high[n]]),
            }
        }
        true
    }
}

impl Default for TernaryTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuffixCmp {
    Equal,
    /// The stored tail is a proper prefix of the rest of the key.
    Prefix,
    Differs,
}

/// Iterator returned by [`TernaryTree::prefix_matches`].
#[derive(Debug, Clone)]
pub struct PrefixMatches<'t, 'k> {
    tree: &'t TernaryTree,
    key: &'k [char],
    node: u32,
    pos: usize,
}

impl Iterator for PrefixMatches<'_, '_> {
    type Item = PrefixMatch;

    fn next(&mut self) -> Option<PrefixMatch> {
        let tree = self.tree;
        while self.node != NIL {
            let n = self.node as usize;
            let s = tree.split[n];

            if s == COMPRESSED {
                self.node = NIL;
                let rest = self.key.get(self.pos..).unwrap_or(&[]);
                return match tree.suffix_cmp(tree.low[n], rest) {
                    SuffixCmp::Differs => None,
                    SuffixCmp::Equal | SuffixCmp::Prefix => Some(PrefixMatch {
                        value: tree.equal[n],
                        end: self.pos + tree.suffix_at(tree.low[n]).len(),
                    }),
                };
            }

            let c = key_at(self.key, self.pos);
            if c == s {
                if c == TERMINATOR {
                    // Already reported when this node was reached.
                    self.node = NIL;
                    return None;
                }
                self.pos += 1;
                self.node = tree.equal[n];
                if let Some(value) = tree.terminal_at(self.node) {
                    return Some(PrefixMatch {
                        value,
                        end: self.pos,
                    });
                }
            } else if c < s {
                self.node = tree.low[n];
            } else {
                self.node = tree.high[n];
            }
        }
        None
    }
}

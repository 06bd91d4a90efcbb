//! Time-bucket keys and the per-row bucket index
//!
//! Buckets are materialized upstream (a month, a quarter, ...). Here they
//! are only grouping keys with a natural order: ordinal keys (integers,
//! dates) by value, textual keys lexically, and missing keys last.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Label given to rows without a bucket key
pub const MISSING_BUCKET_LABEL: &str = "NA";

/// Ordering key of a bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BucketKey {
    /// Integer or temporal key, ordered by value
    Ordinal(i64),
    /// Textual key, ordered lexically
    Label(String),
    /// Row without a key
    Missing,
}

/// A bucket value and its display label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bucket {
    pub key: BucketKey,
    pub label: String,
}

impl Bucket {
    pub fn ordinal(value: i64, label: impl Into<String>) -> Self {
        Self {
            key: BucketKey::Ordinal(value),
            label: label.into(),
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            key: BucketKey::Label(label.clone()),
            label,
        }
    }

    pub fn missing() -> Self {
        Self {
            key: BucketKey::Missing,
            label: MISSING_BUCKET_LABEL.to_string(),
        }
    }
}

impl PartialOrd for Bucket {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bucket {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key).then_with(|| self.label.cmp(&other.label))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Sorted distinct buckets and the bucket code of every row
#[derive(Debug, Clone, PartialEq)]
pub struct BucketIndex {
    buckets: Vec<Bucket>,
    codes: Vec<u32>,
}

impl BucketIndex {
    /// Index where every row falls into the same bucket
    pub fn single(bucket: Bucket, n_rows: usize) -> Self {
        Self {
            buckets: vec![bucket],
            codes: vec![0; n_rows],
        }
    }

    /// Distinct buckets in ascending order
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Bucket position (into [`buckets`](Self::buckets)) of every row
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    pub fn n_rows(&self) -> usize {
        self.codes.len()
    }

    pub fn n_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Row indices of every bucket, in bucket order
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.buckets.len()];
        for (row, &code) in self.codes.iter().enumerate() {
            groups[code as usize].push(row);
        }
        groups
    }
}

/// Incremental builder for a [`BucketIndex`]
///
/// Keys are interned in encounter order and re-coded into their natural
/// order by [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct BucketIndexBuilder {
    ordinals: HashMap<i64, u32>,
    labels: HashMap<String, u32>,
    missing: Option<u32>,
    buckets: Vec<Bucket>,
    codes: Vec<u32>,
}

impl BucketIndexBuilder {
    pub fn with_capacity(n_rows: usize) -> Self {
        Self {
            codes: Vec::with_capacity(n_rows),
            ..Self::default()
        }
    }

    /// Push a row with an ordinal key; the label is only built for new keys
    pub fn push_ordinal(&mut self, value: i64, label: impl FnOnce() -> String) {
        let code = match self.ordinals.get(&value) {
            Some(&code) => code,
            None => {
                let code = self.intern(Bucket::ordinal(value, label()));
                self.ordinals.insert(value, code);
                code
            }
        };
        self.codes.push(code);
    }

    pub fn push_label(&mut self, label: &str) {
        let code = match self.labels.get(label) {
            Some(&code) => code,
            None => {
                let code = self.intern(Bucket::label(label));
                self.labels.insert(label.to_string(), code);
                code
            }
        };
        self.codes.push(code);
    }

    pub fn push_missing(&mut self) {
        let code = match self.missing {
            Some(code) => code,
            None => {
                let code = self.intern(Bucket::missing());
                self.missing = Some(code);
                code
            }
        };
        self.codes.push(code);
    }

    /// Declare a bucket that must appear even if no row carries it
    pub fn declare(&mut self, bucket: Bucket) {
        let known = match &bucket.key {
            BucketKey::Ordinal(v) => self.ordinals.contains_key(v),
            BucketKey::Label(l) => self.labels.contains_key(l),
            BucketKey::Missing => self.missing.is_some(),
        };
        if known {
            return;
        }
        let code = self.next_code();
        match &bucket.key {
            BucketKey::Ordinal(v) => {
                self.ordinals.insert(*v, code);
            }
            BucketKey::Label(l) => {
                self.labels.insert(l.clone(), code);
            }
            BucketKey::Missing => self.missing = Some(code),
        }
        self.buckets.push(bucket);
    }

    pub fn finish(self) -> BucketIndex {
        let mut order: Vec<u32> = (0..self.buckets.len() as u32).collect();
        order.sort_by(|&a, &b| self.buckets[a as usize].cmp(&self.buckets[b as usize]));

        let mut remap = vec![0u32; order.len()];
        for (new_code, &old_code) in order.iter().enumerate() {
            remap[old_code as usize] = new_code as u32;
        }

        let mut slots: Vec<Option<Bucket>> = self.buckets.into_iter().map(Some).collect();
        let buckets = order
            .iter()
            .filter_map(|&old| slots[old as usize].take())
            .collect();
        let codes = self.codes.into_iter().map(|c| remap[c as usize]).collect();

        BucketIndex { buckets, codes }
    }

    fn next_code(&self) -> u32 {
        self.buckets.len() as u32
    }

    fn intern(&mut self, bucket: Bucket) -> u32 {
        let code = self.next_code();
        self.buckets.push(bucket);
        code
    }
}

impl FromIterator<Bucket> for BucketIndex {
    fn from_iter<I: IntoIterator<Item = Bucket>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut builder = BucketIndexBuilder::with_capacity(iter.size_hint().0);
        for bucket in iter {
            match bucket.key {
                BucketKey::Ordinal(v) => builder.push_ordinal(v, || bucket.label),
                BucketKey::Label(l) => builder.push_label(&l),
                BucketKey::Missing => builder.push_missing(),
            }
        }
        builder.finish()
    }
}

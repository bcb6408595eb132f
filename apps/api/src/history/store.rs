//! In-memory generation history with filtering and summary statistics.
//!
//! Records live for the process lifetime only. Identity is insertion order.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

use crate::generation::options::{Category, LengthOption, Recipient, StyleOption};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub recipient: Recipient,
    pub category: Category,
    pub content: String,
    /// Characters in `content`.
    pub length: usize,
    pub style: StyleOption,
    pub length_option: LengthOption,
}

impl HistoryRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        recipient: Recipient,
        category: Category,
        content: String,
        style: StyleOption,
        length_option: LengthOption,
    ) -> Self {
        Self {
            timestamp,
            recipient,
            category,
            length: content.chars().count(),
            content,
            style,
            length_option,
        }
    }
}

/// Optional filters; `None` means "all".
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HistoryFilter {
    pub recipient: Option<Recipient>,
    pub category: Option<Category>,
}

impl HistoryFilter {
    fn matches(&self, record: &HistoryRecord) -> bool {
        self.recipient.map_or(true, |r| record.recipient == r)
            && self.category.map_or(true, |c| record.category == c)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryStats {
    pub total: usize,
    pub average_length: f64,
    pub top_recipient: Option<Recipient>,
    pub top_category: Option<Category>,
}

#[derive(Debug, Default)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its position.
    pub fn push(&mut self, record: HistoryRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Matching records in insertion order, paired with their positions.
    pub fn filtered(&self, filter: HistoryFilter) -> Vec<(usize, &HistoryRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(r))
            .collect()
    }
}

/// Count, mean length and most frequent recipient/category of `records`.
pub fn compute_stats<'a, I>(records: I) -> HistoryStats
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    let mut total = 0usize;
    let mut length_sum = 0usize;
    let mut recipients: BTreeMap<Recipient, usize> = BTreeMap::new();
    let mut categories: BTreeMap<Category, usize> = BTreeMap::new();

    for record in records {
        total += 1;
        length_sum += record.length;
        *recipients.entry(record.recipient).or_default() += 1;
        *categories.entry(record.category).or_default() += 1;
    }

    let average_length = if total == 0 {
        0.0
    } else {
        length_sum as f64 / total as f64
    };

    HistoryStats {
        total,
        average_length,
        top_recipient: mode(&recipients, Recipient::label),
        top_category: mode(&categories, Category::label),
    }
}

/// Most frequent key; ties go to the key whose label sorts first.
fn mode<K: Copy + Ord>(counts: &BTreeMap<K, usize>, label: fn(&K) -> &'static str) -> Option<K> {
    let max = counts.values().copied().max()?;
    counts
        .iter()
        .filter(|&(_, &count)| count == max)
        .map(|(key, _)| *key)
        .min_by_key(|key| label(key))
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.format("%Y-%m-%d %H:%M:%S").to_string())
}

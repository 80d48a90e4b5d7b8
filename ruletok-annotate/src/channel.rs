//! Sparse interval annotations over a text buffer
//!
//! A channel stays empty until its first write. After that it holds one
//! optional value per character plus a [`RunBitmap`] marking where runs
//! begin. Position 0 is always a boundary once the channel is materialized.

use crate::bitmap::RunBitmap;
use crate::error::{AnnotateError, Result};

#[derive(Debug, Clone)]
struct Storage<V> {
    values: Vec<Option<V>>,
    borders: RunBitmap,
}

/// One annotation layer, e.g. token classes or boundary markers
#[derive(Debug, Clone)]
pub struct Channel<V> {
    len: usize,
    storage: Option<Storage<V>>,
}

/// Maximal span sharing one value (or the absence of one)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<V> {
    pub start: usize,
    pub end: usize,
    pub value: Option<V>,
}

impl<V: Copy + PartialEq> Channel<V> {
    /// Create an empty channel for a text of `len` characters
    pub fn new(len: usize) -> Self {
        Self { len, storage: None }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether any annotation has been written yet
    #[inline]
    pub fn is_materialized(&self) -> bool {
        self.storage.is_some()
    }

    /// Overwrite `[begin, end)` with `value`
    ///
    /// Interior boundaries are cleared, `begin` becomes a boundary and so
    /// does `end` unless it is the end of the text.
    pub fn annotate(&mut self, value: V, begin: usize, end: usize) -> Result<()> {
        if begin >= end || end > self.len {
            return Err(AnnotateError::InvalidRange {
                begin,
                end,
                len: self.len,
            });
        }

        let len = self.len;
        let storage = self.storage.get_or_insert_with(|| {
            let mut borders = RunBitmap::new(len);
            borders.set(0);
            Storage {
                values: vec![None; len],
                borders,
            }
        });

        for slot in &mut storage.values[begin..end] {
            *slot = Some(value);
        }
        storage.borders.clear_range(begin + 1, end);
        storage.borders.set(begin);
        if end < len {
            storage.borders.set(end);
        }
        Ok(())
    }

    /// Value at `pos`, `None` if unannotated or outside the text
    #[inline]
    pub fn value_at(&self, pos: usize) -> Option<V> {
        self.storage
            .as_ref()
            .and_then(|s| s.values.get(pos).copied().flatten())
    }

    /// Whether a run starts at `pos`
    #[inline]
    pub fn is_boundary(&self, pos: usize) -> bool {
        self.storage.as_ref().is_some_and(|s| s.borders.get(pos))
    }

    /// Start of the run containing `pos`
    pub fn run_start(&self, pos: usize) -> usize {
        match &self.storage {
            Some(s) => s.borders.prev_set(pos).unwrap_or(0),
            None => 0,
        }
    }

    /// Exclusive end of the run containing `pos`
    pub fn run_limit(&self, pos: usize) -> usize {
        match &self.storage {
            Some(s) => s.borders.next_set_after(pos).unwrap_or(self.len),
            None => self.len,
        }
    }

    /// First position after `pos` that starts a value-bearing run
    ///
    /// Returns the text length when there is none.
    pub fn find_next_annotated(&self, pos: usize) -> usize {
        let Some(s) = &self.storage else {
            return self.len;
        };
        let Some(mut i) = s.borders.next_set_after(pos) else {
            return self.len;
        };
        while i < self.len && s.values[i].is_none() {
            i += 1;
        }
        i
    }

    /// Every run of the channel in text order
    pub fn runs(&self) -> Runs<'_, V> {
        Runs {
            channel: self,
            pos: 0,
        }
    }

    /// Only the runs that carry a value
    pub fn annotated_runs(&self) -> impl Iterator<Item = Run<V>> + '_ {
        self.runs().filter(|run| run.value.is_some())
    }
}

/// Iterator over the runs of a [`Channel`]
#[derive(Debug, Clone)]
pub struct Runs<'a, V> {
    channel: &'a Channel<V>,
    pos: usize,
}

impl<V: Copy + PartialEq> Iterator for Runs<'_, V> {
    type Item = Run<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.channel.len {
            return None;
        }
        let start = self.pos;
        let end = self.channel.run_limit(start);
        self.pos = end;
        Some(Run {
            start,
            end,
            value: self.channel.value_at(start),
        })
    }
}

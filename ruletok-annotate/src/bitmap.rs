//! Dense run-boundary bitmap
//!
//! One bit per character position; a set bit means a new run starts there.
//! Scans work a word at a time, so probing for the nearest boundary costs
//! at most one step per 64 positions of distance.

const WORD_BITS: usize = 64;

/// Fixed-length bitmap of run boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunBitmap {
    words: Vec<u64>,
    len: usize,
}

impl RunBitmap {
    /// Create an all-clear bitmap covering `len` positions
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Number of positions covered
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, pos: usize) -> bool {
        pos < self.len && self.words[pos / WORD_BITS] & (1 << (pos % WORD_BITS)) != 0
    }

    #[inline]
    pub fn set(&mut self, pos: usize) {
        debug_assert!(pos < self.len);
        self.words[pos / WORD_BITS] |= 1 << (pos % WORD_BITS);
    }

    #[inline]
    pub fn clear(&mut self, pos: usize) {
        debug_assert!(pos < self.len);
        self.words[pos / WORD_BITS] &= !(1 << (pos % WORD_BITS));
    }

    /// Clear every bit in `[begin, end)`
    pub fn clear_range(&mut self, begin: usize, end: usize) {
        let end = end.min(self.len);
        let mut pos = begin;
        while pos < end {
            let bit = pos % WORD_BITS;
            let word = pos / WORD_BITS;
            let span = (WORD_BITS - bit).min(end - pos);
            let mask = if span == WORD_BITS {
                u64::MAX
            } else {
                ((1u64 << span) - 1) << bit
            };
            self.words[word] &= !mask;
            pos += span;
        }
    }

    /// Nearest set bit at or before `pos`
    pub fn prev_set(&self, pos: usize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let pos = pos.min(self.len - 1);
        let mut word = pos / WORD_BITS;
        let bit = pos % WORD_BITS;
        // keep bits 0..=bit of the first word
        let mut bits = self.words[word]
            & if bit == WORD_BITS - 1 {
                u64::MAX
            } else {
                (1u64 << (bit + 1)) - 1
            };
        loop {
            if bits != 0 {
                return Some(word * WORD_BITS + (WORD_BITS - 1 - bits.leading_zeros() as usize));
            }
            if word == 0 {
                return None;
            }
            word -= 1;
            bits = self.words[word];
        }
    }

    /// Nearest set bit strictly after `pos`
    pub fn next_set_after(&self, pos: usize) -> Option<usize> {
        let start = pos.checked_add(1)?;
        if start >= self.len {
            return None;
        }
        let mut word = start / WORD_BITS;
        let bit = start % WORD_BITS;
        let mut bits = self.words[word] & (u64::MAX << bit);
        loop {
            if bits != 0 {
                let found = word * WORD_BITS + bits.trailing_zeros() as usize;
                return (found < self.len).then_some(found);
            }
            word += 1;
            if word >= self.words.len() {
                return None;
            }
            bits = self.words[word];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let mut bitmap = RunBitmap::new(130);
        bitmap.set(0);
        bitmap.set(64);
        bitmap.set(129);
        assert!(bitmap.get(0));
        assert!(bitmap.get(64));
        assert!(bitmap.get(129));
        assert!(!bitmap.get(1));
        assert!(!bitmap.get(500));
        bitmap.clear(64);
        assert!(!bitmap.get(64));
    }

    #[test]
    fn test_prev_set_crosses_words() {
        let mut bitmap = RunBitmap::new(200);
        bitmap.set(3);
        bitmap.set(70);
        assert_eq!(bitmap.prev_set(199), Some(70));
        assert_eq!(bitmap.prev_set(70), Some(70));
        assert_eq!(bitmap.prev_set(69), Some(3));
        assert_eq!(bitmap.prev_set(2), None);
    }

    #[test]
    fn test_next_set_after_crosses_words() {
        let mut bitmap = RunBitmap::new(200);
        bitmap.set(3);
        bitmap.set(130);
        assert_eq!(bitmap.next_set_after(0), Some(3));
        assert_eq!(bitmap.next_set_after(3), Some(130));
        assert_eq!(bitmap.next_set_after(130), None);
        assert_eq!(bitmap.next_set_after(usize::MAX), None);
    }

    #[test]
    fn test_clear_range_spanning_words() {
        let mut bitmap = RunBitmap::new(200);
        for pos in [10, 63, 64, 127, 128, 150] {
            bitmap.set(pos);
        }
        bitmap.clear_range(11, 150);
        assert!(bitmap.get(10));
        assert!(!bitmap.get(63));
        assert!(!bitmap.get(64));
        assert!(!bitmap.get(127));
        assert!(!bitmap.get(128));
        assert!(bitmap.get(150));
    }

    #[test]
    fn test_clear_full_word() {
        let mut bitmap = RunBitmap::new(128);
        for pos in 64..128 {
            bitmap.set(pos);
        }
        bitmap.clear_range(64, 128);
        assert_eq!(bitmap.next_set_after(0), None);
    }
}

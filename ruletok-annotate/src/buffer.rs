//! Immutable character buffer and a cursor over it
//!
//! Positions are character indices in `[0, len]`; `len` is the
//! end-of-text sentinel. The buffer itself carries no iteration state,
//! every scan owns its own [`Cursor`].

use crate::error::{AnnotateError, Result};

/// Immutable, character-indexed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
}

impl TextBuffer {
    /// Create a buffer from a string
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// Number of characters, which is also the end-of-text sentinel
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `pos`, `None` at the sentinel position
    ///
    /// Positions beyond the sentinel are rejected.
    pub fn char_at(&self, pos: usize) -> Result<Option<char>> {
        if pos > self.chars.len() {
            return Err(AnnotateError::InvalidIndex {
                index: pos,
                len: self.chars.len(),
            });
        }
        Ok(self.chars.get(pos).copied())
    }

    /// Character at `pos` without the sentinel check, `None` if out of range
    #[inline]
    pub fn get(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// Text of the half-open range `[begin, end)`
    pub fn substring(&self, begin: usize, end: usize) -> Result<String> {
        if begin > end || end > self.chars.len() {
            return Err(AnnotateError::InvalidRange {
                begin,
                end,
                len: self.chars.len(),
            });
        }
        Ok(self.chars[begin..end].iter().collect())
    }

    /// Borrow the characters of `[begin, end)`
    pub fn slice(&self, begin: usize, end: usize) -> Result<&[char]> {
        if begin > end || end > self.chars.len() {
            return Err(AnnotateError::InvalidRange {
                begin,
                end,
                len: self.chars.len(),
            });
        }
        Ok(&self.chars[begin..end])
    }

    /// Create a cursor positioned at the first character
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            buffer: self,
            index: 0,
        }
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in &self.chars {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Character iterator with random positioning
///
/// Mirrors the classic character-iterator contract: every movement returns
/// the character at the new position, or `None` once the sentinel is reached.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a TextBuffer,
    index: usize,
}

impl<'a> Cursor<'a> {
    /// Current position
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the start and return the first character
    pub fn first(&mut self) -> Option<char> {
        self.index = 0;
        self.current()
    }

    /// Character at the current position
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.buffer.get(self.index)
    }

    /// Advance by one; stops at the sentinel
    pub fn next_char(&mut self) -> Option<char> {
        let len = self.buffer.len();
        if self.index + 1 < len {
            self.index += 1;
            self.current()
        } else {
            self.index = len;
            None
        }
    }

    /// Step back by one; stays put at position 0
    pub fn previous(&mut self) -> Option<char> {
        if self.index > 0 {
            self.index -= 1;
            self.current()
        } else {
            None
        }
    }

    /// Jump to `pos` (which may be the sentinel)
    pub fn set_index(&mut self, pos: usize) -> Result<Option<char>> {
        if pos > self.buffer.len() {
            return Err(AnnotateError::InvalidIndex {
                index: pos,
                len: self.buffer.len(),
            });
        }
        self.index = pos;
        Ok(self.current())
    }

    /// Whether the cursor sits on the end-of-text sentinel
    #[inline]
    pub fn is_done(&self) -> bool {
        self.index >= self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_at_and_sentinel() {
        let buffer = TextBuffer::new("añb");
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.char_at(1).unwrap(), Some('ñ'));
        assert_eq!(buffer.char_at(3).unwrap(), None);
        assert!(buffer.char_at(4).is_err());
    }

    #[test]
    fn test_substring_rejects_bad_ranges() {
        let buffer = TextBuffer::new("hello");
        assert_eq!(buffer.substring(1, 4).unwrap(), "ell");
        assert_eq!(buffer.substring(2, 2).unwrap(), "");
        assert!(buffer.substring(3, 2).is_err());
        assert!(buffer.substring(0, 6).is_err());
    }

    #[test]
    fn test_cursor_walk() {
        let buffer = TextBuffer::new("ab");
        let mut cursor = buffer.cursor();
        assert_eq!(cursor.first(), Some('a'));
        assert_eq!(cursor.next_char(), Some('b'));
        assert_eq!(cursor.next_char(), None);
        assert!(cursor.is_done());
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.previous(), Some('b'));
        assert_eq!(cursor.set_index(0).unwrap(), Some('a'));
        assert_eq!(cursor.previous(), None);
        assert!(cursor.set_index(3).is_err());
    }

    #[test]
    fn test_empty_buffer_cursor() {
        let buffer = TextBuffer::new("");
        let mut cursor = buffer.cursor();
        assert_eq!(cursor.first(), None);
        assert!(cursor.is_done());
        assert_eq!(cursor.next_char(), None);
    }
}

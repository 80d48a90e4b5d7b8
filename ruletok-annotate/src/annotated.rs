//! Text buffer with its two annotation channels

use std::fmt;

use crate::buffer::TextBuffer;
use crate::channel::Channel;
use crate::error::Result;

/// Segment boundary marker stored on the border channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Border {
    /// A new text unit (sentence) starts here
    TextUnit,
    /// A new paragraph starts here
    Paragraph,
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Border::TextUnit => write!(f, "tu"),
            Border::Paragraph => write!(f, "p"),
        }
    }
}

/// Annotated text: the buffer, a token-class channel and a border channel
#[derive(Debug, Clone)]
pub struct AnnotatedText<V> {
    buffer: TextBuffer,
    class: Channel<V>,
    border: Channel<Border>,
}

impl<V: Copy + PartialEq> AnnotatedText<V> {
    pub fn new(text: &str) -> Self {
        let buffer = TextBuffer::new(text);
        let len = buffer.len();
        Self {
            buffer,
            class: Channel::new(len),
            border: Channel::new(len),
        }
    }

    #[inline]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn class(&self) -> &Channel<V> {
        &self.class
    }

    #[inline]
    pub fn border(&self) -> &Channel<Border> {
        &self.border
    }

    /// Annotate `[begin, end)` on the class channel
    pub fn annotate_class(&mut self, value: V, begin: usize, end: usize) -> Result<()> {
        self.class.annotate(value, begin, end)
    }

    /// Mark a boundary on the single character at `pos`
    pub fn mark_border(&mut self, border: Border, pos: usize) -> Result<()> {
        self.border.annotate(border, pos, pos + 1)
    }

    /// Text of `[begin, end)`
    pub fn substring(&self, begin: usize, end: usize) -> Result<String> {
        self.buffer.substring(begin, end)
    }
}

impl<V: Copy + PartialEq + fmt::Display> AnnotatedText<V> {
    /// Write every class-annotated run as `image<TAB>start-end<TAB>value`,
    /// with a `[border]` suffix where a border marker starts
    pub fn dump(&self, f: &mut impl fmt::Write) -> fmt::Result {
        for run in self.class.annotated_runs() {
            let image: String = self
                .buffer
                .slice(run.start, run.end)
                .map(|chars| chars.iter().collect())
                .unwrap_or_default();
            if let Some(value) = run.value {
                write!(f, "{image}\t{}-{}\t{value}", run.start, run.end)?;
            }
            if let Some(border) = self.border.value_at(run.start) {
                write!(f, "\t[{border}]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<V: Copy + PartialEq + fmt::Display> fmt::Display for AnnotatedText<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f)
    }
}

//! Run-indexed annotation store for rule-driven tokenization
//!
//! This crate holds the data structure every tokenization pass works on:
//! an immutable character buffer plus independent annotation channels.
//! Each channel records interval annotations and the boundaries of the runs
//! they form, so "where does the run at this position start or end" is a
//! bitmap scan rather than a search.
//!
//! # Example
//!
//! ```rust
//! use ruletok_annotate::{AnnotatedText, Border};
//!
//! let mut text: AnnotatedText<u8> = AnnotatedText::new("Hi there.");
//! text.annotate_class(1, 0, 2).unwrap();
//! text.annotate_class(1, 3, 8).unwrap();
//! text.annotate_class(2, 8, 9).unwrap();
//! text.mark_border(Border::TextUnit, 0).unwrap();
//!
//! assert_eq!(text.class().run_limit(3), 8);
//! assert_eq!(text.class().find_next_annotated(0), 3);
//! assert_eq!(text.class().annotated_runs().count(), 3);
//! ```

pub mod annotated;
pub mod bitmap;
pub mod buffer;
pub mod channel;
pub mod error;

pub use annotated::{AnnotatedText, Border};
pub use bitmap::RunBitmap;
pub use buffer::{Cursor, TextBuffer};
pub use channel::{Channel, Run, Runs};
pub use error::{AnnotateError, Result};

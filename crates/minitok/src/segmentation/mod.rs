//! # Text Segmentation

pub mod text_segmentor;

pub use text_segmentor::{SpanRef, TextSegmentor, is_word_span};

//! # Common Types and Traits
use core::borrow::Borrow;
use core::hash::Hash;
use num_traits::{FromPrimitive, Num, ToPrimitive, Unsigned};
use std::fmt::{Debug, Display};
use std::ops::{AddAssign, SubAssign};

/// A type that can be used as a token id.
pub trait TokenType:
    'static
    + Default
    + Debug
    + Display
    + Clone
    + Copy
    + Hash
    + Send
    + Sync
    + Unsigned
    + FromPrimitive
    + ToPrimitive
    + Ord
    + serde::Serialize
    + for<'de> serde::Deserialize<'de>
{
}

impl<T> TokenType for T where
    T: 'static
        + Default
        + Debug
        + Display
        + Clone
        + Copy
        + Hash
        + Send
        + Sync
        + Unsigned
        + FromPrimitive
        + ToPrimitive
        + Ord
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>
{
}

/// A pair of adjacent tokens.
pub type Pair<T> = (T, T);

/// A type that can be used as a word count.
pub trait CountType:
    Num
    + AddAssign
    + SubAssign
    + Default
    + Copy
    + Debug
    + Display
    + Send
    + Sync
    + Hash
    + Ord
    + FromPrimitive
{
}

impl<T> CountType for T where
    T: Num
        + AddAssign
        + SubAssign
        + Default
        + Copy
        + Debug
        + Display
        + Send
        + Sync
        + Hash
        + Ord
        + FromPrimitive
{
}

/// A type that can be used as a string key.
pub trait StringChunkType:
    for<'a> From<&'a str>
    + AsRef<str>
    + Borrow<str>
    + Debug
    + Clone
    + Send
    + Sync
    + Eq
    + Hash
    + Ord
{
}

impl<T> StringChunkType for T where
    T: for<'a> From<&'a str>
        + AsRef<str>
        + Borrow<str>
        + Debug
        + Clone
        + Send
        + Sync
        + Eq
        + Hash
        + Ord
{
}

/// [`Pair<T>`] to merge rank map.
pub type PairRankMap<T> = ahash::AHashMap<Pair<T>, usize>;

/// Check if a type is `Send`.
#[cfg(test)]
pub(crate) fn check_is_send<S: Send>(_: S) {}

#[cfg(test)]
/// Check if a type is `Sync`.
pub(crate) fn check_is_sync<S: Sync>(_: S) {}

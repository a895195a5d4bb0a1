//! Response shape normalization
//!
//! Some OptionsHouse responses declare a field as a list but send a bare
//! object when the list would hold exactly one element. Each such response
//! gets two schema types: a strict one where the field is a `Vec`, and a
//! fallback one where it is a single object. [`normalize`] tries the strict
//! schema, then the fallback, and hands back one uniform collection.
//!
//! Nothing here logs; the caller decides what to report.

use serde::de::DeserializeOwned;
use std::fmt;
use std::ops::Index;
use thiserror::Error;

/// Response schema in which the ambiguous field is a list.
pub trait CollectionShape: DeserializeOwned {
    /// Every field of the response other than the ambiguous one
    type Head;
    type Item;

    fn into_parts(self) -> (Self::Head, Vec<Self::Item>);
}

/// Response schema in which the ambiguous field is one object.
pub trait SingleShape: DeserializeOwned {
    type Head;
    type Item;

    fn into_parts(self) -> (Self::Head, Self::Item);
}

/// Which schema accepted the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePath {
    Strict,
    Fallback,
}

impl fmt::Display for ParsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePath::Strict => write!(f, "strict"),
            ParsePath::Fallback => write!(f, "fallback"),
        }
    }
}

/// Outcome of [`parse_shape`]
#[derive(Debug)]
pub enum ParsedShape<S, F> {
    Strict(S),
    Fallback(F),
}

impl<S, F> ParsedShape<S, F> {
    pub fn path(&self) -> ParsePath {
        match self {
            ParsedShape::Strict(_) => ParsePath::Strict,
            ParsedShape::Fallback(_) => ParsePath::Fallback,
        }
    }
}

/// Errors raised by the normalizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("response matches neither shape (strict: {strict}; fallback: {fallback})")]
    Unrecognized { strict: String, fallback: String },
}

/// Ordered items plus the path that produced them.
///
/// The strict path keeps server order; the fallback path always holds
/// exactly one item.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCollection<T> {
    items: Vec<T>,
    path: ParsePath,
}

impl<T> NormalizedCollection<T> {
    pub fn strict(items: Vec<T>) -> Self {
        Self {
            items,
            path: ParsePath::Strict,
        }
    }

    pub fn single(item: T) -> Self {
        Self {
            items: vec![item],
            path: ParsePath::Fallback,
        }
    }

    pub fn path(&self) -> ParsePath {
        self.path
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for NormalizedCollection<T> {
    fn default() -> Self {
        Self::strict(Vec::new())
    }
}

impl<T> Index<usize> for NormalizedCollection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IntoIterator for NormalizedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NormalizedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A normalized response: shared fields, the collection, and the raw text.
#[derive(Debug, Clone)]
pub struct Normalized<H, T> {
    pub head: H,
    pub items: NormalizedCollection<T>,
    pub raw: String,
}

/// Try the strict schema, then the fallback one.
pub fn parse_shape<S, F>(raw: &str) -> Result<ParsedShape<S, F>, ShapeError>
where
    S: DeserializeOwned,
    F: DeserializeOwned,
{
    let strict_err = match serde_json::from_str::<S>(raw) {
        Ok(doc) => return Ok(ParsedShape::Strict(doc)),
        Err(e) => e,
    };

    match serde_json::from_str::<F>(raw) {
        Ok(doc) => Ok(ParsedShape::Fallback(doc)),
        Err(fallback_err) => Err(ShapeError::Unrecognized {
            strict: strict_err.to_string(),
            fallback: fallback_err.to_string(),
        }),
    }
}

/// Parse `raw` into a uniform collection regardless of which shape the
/// server chose.
pub fn normalize<S, F>(raw: &str) -> Result<Normalized<S::Head, S::Item>, ShapeError>
where
    S: CollectionShape,
    F: SingleShape<Head = S::Head, Item = S::Item>,
{
    let (head, items) = match parse_shape::<S, F>(raw)? {
        ParsedShape::Strict(doc) => {
            let (head, items) = doc.into_parts();
            (head, NormalizedCollection::strict(items))
        }
        ParsedShape::Fallback(doc) => {
            let (head, item) = doc.into_parts();
            (head, NormalizedCollection::single(item))
        }
    };

    Ok(Normalized {
        head,
        items,
        raw: raw.to_string(),
    })
}

//! The engine's native numeric array.
//!
//! A [`NumericArray`] is a dimension vector plus typed data in column-major
//! order (first dimension varies fastest).

use std::fmt;

use sb_core::{Element, ElementKind, Error, Result};

/// Storage class of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayClass {
    Double,
    Single,
    Int32,
}

impl ArrayClass {
    /// The class an image of `kind` is injected as.
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Int => Self::Int32,
            ElementKind::Float => Self::Single,
            ElementKind::Double => Self::Double,
        }
    }
}

impl fmt::Display for ArrayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Double => write!(f, "double"),
            Self::Single => write!(f, "single"),
            Self::Int32 => write!(f, "int32"),
        }
    }
}

/// Typed column-major array data.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Double(Vec<f64>),
    Single(Vec<f32>),
    Int32(Vec<i32>),
}

impl ArrayData {
    /// Pack `values` into the class matching `T`.
    pub fn from_elements<T: Element>(values: &[T]) -> Self {
        match ArrayClass::for_kind(T::KIND) {
            ArrayClass::Double => Self::Double(values.iter().map(|v| v.to_f64()).collect()),
            ArrayClass::Single => {
                Self::Single(values.iter().map(|v| v.to_f64() as f32).collect())
            }
            ArrayClass::Int32 => Self::Int32(values.iter().map(|v| v.to_f64() as i32).collect()),
        }
    }

    pub fn class(&self) -> ArrayClass {
        match self {
            Self::Double(_) => ArrayClass::Double,
            Self::Single(_) => ArrayClass::Single,
            Self::Int32(_) => ArrayClass::Int32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Double(v) => v.len(),
            Self::Single(v) => v.len(),
            Self::Int32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `index` widened to `f64`. Panics when out of bounds.
    pub fn value_f64(&self, index: usize) -> f64 {
        match self {
            Self::Double(v) => v[index],
            Self::Single(v) => f64::from(v[index]),
            Self::Int32(v) => f64::from(v[index]),
        }
    }
}

/// A dense n-dimensional array as the engine stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    dims: Vec<usize>,
    data: ArrayData,
}

impl NumericArray {
    /// Create an array, checking that `data` fills `dims` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] on a length mismatch.
    pub fn new(dims: Vec<usize>, data: ArrayData) -> Result<Self> {
        let numel: usize = dims.iter().product();
        if numel != data.len() {
            return Err(Error::conversion(format!(
                "array dimensions {dims:?} need {numel} elements, data holds {}",
                data.len()
            )));
        }
        Ok(Self { dims, data })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Extent of dimension `axis`; dimensions past the rank are 1.
    pub fn dim(&self, axis: usize) -> usize {
        self.dims.get(axis).copied().unwrap_or(1)
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn class(&self) -> ArrayClass {
        self.data.class()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }
}

//! Generic image buffer shared by the pipeline and the engine codecs.
//!
//! An [`Image`] is a dense four-dimensional buffer (`width` x `height` x
//! `depth` x `spectrum`) stored with `x` varying fastest, then `y`, `z`, and
//! finally the channel `c`. The element type is one of the [`Element`]
//! implementors (`i32`, `f32`, `f64`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// ElementKind
// ---------------------------------------------------------------------------

/// Numeric element type of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Int,
    Float,
    Double,
}

impl ElementKind {
    /// Map a template tag to an element kind.
    ///
    /// Unknown tags fall back to [`ElementKind::Int`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.parse() {
            Ok(kind) => kind,
            Err(_) => {
                tracing::warn!("Unknown element type '{tag}'; falling back to int");
                Self::Int
            }
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
        }
    }
}

impl FromStr for ElementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "int" | "i32" => Ok(Self::Int),
            "float" | "f32" => Ok(Self::Float),
            "double" | "f64" => Ok(Self::Double),
            other => Err(Error::invalid_config(format!(
                "unknown element type '{other}' (valid: int, float, double)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A numeric pixel type.
///
/// Every implementor survives a round trip through `f64` unchanged, which is
/// what the codecs rely on when the engine hands back a different class.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The kind tag for this element type.
    const KIND: ElementKind;

    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Narrow from `f64`. Integer targets truncate and saturate.
    fn from_f64(value: f64) -> Self;
}

impl Element for i32 {
    const KIND: ElementKind = ElementKind::Int;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value as i32
    }
}

impl Element for f32 {
    const KIND: ElementKind = ElementKind::Float;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Element for f64 {
    const KIND: ElementKind = ElementKind::Double;

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// Dense image buffer with `x`-fastest layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    depth: usize,
    spectrum: usize,
    data: Vec<T>,
}

impl<T: Element> Image<T> {
    /// Create an image filled with `T::default()`.
    pub fn new(width: usize, height: usize, depth: usize, spectrum: usize) -> Self {
        Self {
            width,
            height,
            depth,
            spectrum,
            data: vec![T::default(); width * height * depth * spectrum],
        }
    }

    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] if `data.len()` does not match the
    /// product of the dimensions.
    pub fn from_vec(
        width: usize,
        height: usize,
        depth: usize,
        spectrum: usize,
        data: Vec<T>,
    ) -> Result<Self> {
        let expected = width * height * depth * spectrum;
        if data.len() != expected {
            return Err(Error::conversion(format!(
                "buffer holds {} elements but {width}x{height}x{depth}x{spectrum} needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            depth,
            spectrum,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of channels.
    pub fn spectrum(&self) -> usize {
        self.spectrum
    }

    /// `[width, height, depth, spectrum]`.
    pub fn dims(&self) -> [usize; 4] {
        [self.width, self.height, self.depth, self.spectrum]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear offset of `(x, y, z, c)` in the buffer.
    pub fn offset(&self, x: usize, y: usize, z: usize, c: usize) -> usize {
        x + self.width * (y + self.height * (z + self.depth * c))
    }

    /// Value at `(x, y, z, c)`. Panics when out of bounds.
    pub fn at(&self, x: usize, y: usize, z: usize, c: usize) -> T {
        self.data[self.offset(x, y, z, c)]
    }

    /// Store `value` at `(x, y, z, c)`. Panics when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, z: usize, c: usize, value: T) {
        let offset = self.offset(x, y, z, c);
        self.data[offset] = value;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn new_image_is_zeroed() {
        let img: Image<i32> = Image::new(3, 2, 1, 1);
        assert_eq!(img.len(), 6);
        assert!(img.as_slice().iter().all(|&v| v == 0));
        assert_eq!(img.dims(), [3, 2, 1, 1]);
    }

    #[test]
    fn x_varies_fastest() {
        let img = Image::from_vec(2, 2, 1, 2, (0..8).collect::<Vec<i32>>()).unwrap();
        assert_eq!(img.at(1, 0, 0, 0), 1);
        assert_eq!(img.at(0, 1, 0, 0), 2);
        assert_eq!(img.at(0, 0, 0, 1), 4);
        assert_eq!(img.at(1, 1, 0, 1), 7);
    }

    #[test]
    fn set_then_read_back() {
        let mut img: Image<f32> = Image::new(4, 4, 1, 3);
        img.set(3, 2, 0, 1, 0.25);
        assert_eq!(img.at(3, 2, 0, 1), 0.25);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let result = Image::from_vec(2, 2, 1, 1, vec![1.0f64; 3]);
        assert_matches!(result, Err(Error::Conversion(msg)) if msg.contains("needs 4"));
    }

    #[test]
    fn element_round_trips_through_f64() {
        assert_eq!(i32::from_f64((-7i32).to_f64()), -7);
        assert_eq!(f32::from_f64(0.1f32.to_f64()), 0.1f32);
        assert_eq!(f64::from_f64(1e-300), 1e-300);
    }

    #[test]
    fn int_narrowing_truncates_and_saturates() {
        assert_eq!(i32::from_f64(2.9), 2);
        assert_eq!(i32::from_f64(-2.9), -2);
        assert_eq!(i32::from_f64(1e12), i32::MAX);
    }

    #[test]
    fn element_kind_from_tag_defaults_to_int() {
        assert_eq!(ElementKind::from_tag("double"), ElementKind::Double);
        assert_eq!(ElementKind::from_tag("FLOAT"), ElementKind::Float);
        assert_eq!(ElementKind::from_tag("complex"), ElementKind::Int);
    }

    #[test]
    fn element_kind_parse_rejects_unknown() {
        assert_matches!(
            "uint8".parse::<ElementKind>(),
            Err(Error::InvalidConfiguration(_))
        );
    }

    #[test]
    fn element_kind_serde_lowercase() {
        let json = serde_json::to_string(&ElementKind::Double).unwrap();
        assert_eq!(json, "\"double\"");
        let back: ElementKind = serde_json::from_str("\"float\"").unwrap();
        assert_eq!(back, ElementKind::Float);
    }
}

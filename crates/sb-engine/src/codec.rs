//! Conversion between pipeline images and engine arrays.
//!
//! The engine indexes arrays as `(row, column, page, channel)`, so an image
//! pixel `(x, y, z, c)` lands at row `y`, column `x`. Conversion walks the
//! buffer one element at a time and transposes the first two axes on the way.

use sb_core::{Element, Error, Image, Result};

use crate::array::{ArrayData, NumericArray};

/// Converts one image buffer to the engine's array type and back.
pub trait ImageCodec<T: Element>: Send + Sync {
    /// Image to array.
    fn to_array(&self, image: &Image<T>) -> Result<NumericArray>;

    /// Array to image.
    fn from_array(&self, array: &NumericArray) -> Result<Image<T>>;
}

/// Element-by-element codec for dense arrays of rank up to four.
///
/// Outgoing arrays keep the element class of `T` and drop trailing singleton
/// dimensions (never below rank two). Incoming arrays of any class are cast
/// to `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseCodec;

impl<T: Element> ImageCodec<T> for DenseCodec {
    fn to_array(&self, image: &Image<T>) -> Result<NumericArray> {
        let [width, height, depth, spectrum] = image.dims();

        let mut values = Vec::with_capacity(image.len());
        for c in 0..spectrum {
            for z in 0..depth {
                for x in 0..width {
                    for y in 0..height {
                        values.push(image.at(x, y, z, c));
                    }
                }
            }
        }

        let mut dims = vec![height, width, depth, spectrum];
        while dims.len() > 2 && dims.last() == Some(&1) {
            dims.pop();
        }

        NumericArray::new(dims, ArrayData::from_elements(&values))
    }

    fn from_array(&self, array: &NumericArray) -> Result<Image<T>> {
        if array.numel() == 0 {
            return Err(Error::conversion(format!(
                "engine returned an empty {} array with dimensions {:?}",
                array.class(),
                array.dims()
            )));
        }
        if array.dims().iter().skip(4).any(|&d| d != 1) {
            return Err(Error::conversion(format!(
                "cannot map a {}-dimensional array {:?} onto an image",
                array.dims().len(),
                array.dims()
            )));
        }

        let (height, width, depth, spectrum) =
            (array.dim(0), array.dim(1), array.dim(2), array.dim(3));
        let data = array.data();

        let mut image = Image::new(width, height, depth, spectrum);
        let mut index = 0;
        for c in 0..spectrum {
            for z in 0..depth {
                for x in 0..width {
                    for y in 0..height {
                        image.set(x, y, z, c, T::from_f64(data.value_f64(index)));
                        index += 1;
                    }
                }
            }
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayClass;
    use assert_matches::assert_matches;

    fn ramp(width: usize, height: usize, spectrum: usize) -> Image<i32> {
        let n = width * height * spectrum;
        Image::from_vec(width, height, 1, spectrum, (0..n as i32).collect()).unwrap()
    }

    #[test]
    fn to_array_transposes_rows_and_columns() {
        // 3 wide, 2 high: row-major [0 1 2; 3 4 5]
        let img = ramp(3, 2, 1);
        let arr = ImageCodec::<i32>::to_array(&DenseCodec, &img).unwrap();
        assert_eq!(arr.dims(), &[2, 3]);
        assert_eq!(arr.data(), &ArrayData::Int32(vec![0, 3, 1, 4, 2, 5]));
    }

    #[test]
    fn to_array_keeps_channel_dimension() {
        let img = ramp(2, 2, 3);
        let arr = ImageCodec::<i32>::to_array(&DenseCodec, &img).unwrap();
        assert_eq!(arr.dims(), &[2, 2, 1, 3]);
    }

    #[test]
    fn to_array_uses_element_class() {
        let img: Image<f32> = Image::new(2, 2, 1, 1);
        let arr = DenseCodec.to_array(&img).unwrap();
        assert_eq!(arr.class(), ArrayClass::Single);
    }

    #[test]
    fn round_trip_is_identity() {
        let img = Image::from_vec(
            3,
            2,
            2,
            2,
            (0..24).map(|v| v as f64 * 0.5 - 3.0).collect(),
        )
        .unwrap();
        let arr = DenseCodec.to_array(&img).unwrap();
        let back: Image<f64> = DenseCodec.from_array(&arr).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn from_array_casts_other_classes() {
        let arr = NumericArray::new(vec![1, 2], ArrayData::Double(vec![1.75, -2.5])).unwrap();
        let img: Image<i32> = DenseCodec.from_array(&arr).unwrap();
        assert_eq!(img.dims(), [2, 1, 1, 1]);
        assert_eq!(img.as_slice(), &[1, -2]);
    }

    #[test]
    fn from_array_rejects_empty() {
        let arr = NumericArray::new(vec![0, 0], ArrayData::Double(vec![])).unwrap();
        let result: Result<Image<f64>> = DenseCodec.from_array(&arr);
        assert_matches!(result, Err(Error::Conversion(msg)) if msg.contains("empty"));
    }

    #[test]
    fn from_array_rejects_rank_five() {
        let arr =
            NumericArray::new(vec![1, 1, 1, 1, 2], ArrayData::Double(vec![0.0, 1.0])).unwrap();
        let result: Result<Image<f64>> = DenseCodec.from_array(&arr);
        assert_matches!(result, Err(Error::Conversion(_)));
    }

    #[test]
    fn from_array_accepts_trailing_singletons() {
        let arr =
            NumericArray::new(vec![2, 1, 1, 1, 1], ArrayData::Int32(vec![7, 8])).unwrap();
        let img: Image<i32> = DenseCodec.from_array(&arr).unwrap();
        assert_eq!(img.dims(), [1, 2, 1, 1]);
        assert_eq!(img.as_slice(), &[7, 8]);
    }
}

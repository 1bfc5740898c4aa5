//! Image file I/O.
//!
//! Decodes files with the `image` crate into [`sb_core::Image`] buffers and
//! writes results back. Pixel values keep their 8-bit range (0 -- 255) in
//! every element type; alpha channels are dropped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use sb_core::{Element, ElementKind, Image};
use sb_pipeline::AnyImageList;

/// Load one image file as a 2-D buffer with one (gray) or three (RGB)
/// channels.
pub fn load_image<T: Element>(path: &Path) -> Result<Image<T>> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?;

    let (width, height) = (img.width() as usize, img.height() as usize);
    let gray = img.color().channel_count() <= 2;
    let spectrum = if gray { 1 } else { 3 };
    let mut out = Image::new(width, height, 1, spectrum);

    if gray {
        for (x, y, pixel) in img.to_luma8().enumerate_pixels() {
            out.set(x as usize, y as usize, 0, 0, T::from_f64(f64::from(pixel[0])));
        }
    } else {
        for (x, y, pixel) in img.to_rgb8().enumerate_pixels() {
            for c in 0..3 {
                out.set(x as usize, y as usize, 0, c, T::from_f64(f64::from(pixel[c])));
            }
        }
    }

    tracing::debug!(
        "Loaded {} as {width}x{height}x{spectrum} {} image",
        path.display(),
        T::KIND
    );
    Ok(out)
}

/// Write a 2-D gray or RGB buffer to `path`; the format follows the
/// extension. Values are rounded and clamped to 0 -- 255.
pub fn save_image<T: Element>(image: &Image<T>, path: &Path) -> Result<()> {
    if image.depth() != 1 {
        anyhow::bail!(
            "Cannot save {} with depth {}: only 2-D images can be written",
            path.display(),
            image.depth()
        );
    }

    let (width, height) = (image.width() as u32, image.height() as u32);
    let to_u8 = |v: T| v.to_f64().round().clamp(0.0, 255.0) as u8;

    let dynamic = match image.spectrum() {
        1 => DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |x, y| {
            Luma([to_u8(image.at(x as usize, y as usize, 0, 0))])
        })),
        3 => DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let (x, y) = (x as usize, y as usize);
            Rgb([
                to_u8(image.at(x, y, 0, 0)),
                to_u8(image.at(x, y, 0, 1)),
                to_u8(image.at(x, y, 0, 2)),
            ])
        })),
        n => anyhow::bail!(
            "Cannot save {} with {n} channels: only 1 or 3 are supported",
            path.display()
        ),
    };

    dynamic
        .save(path)
        .with_context(|| format!("Failed to write image {}", path.display()))
}

/// Load every file in `paths`, in order, as one list of `kind` images.
pub fn load_list(paths: &[PathBuf], kind: ElementKind) -> Result<AnyImageList> {
    Ok(match kind {
        ElementKind::Int => AnyImageList::Int(load_all(paths)?),
        ElementKind::Float => AnyImageList::Float(load_all(paths)?),
        ElementKind::Double => AnyImageList::Double(load_all(paths)?),
    })
}

/// Save `list[i]` into `out_dir` under the file name of `inputs[i]`.
///
/// Returns the written paths.
pub fn save_list(
    list: &AnyImageList,
    inputs: &[PathBuf],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    if list.len() != inputs.len() {
        anyhow::bail!(
            "Got {} result images for {} inputs",
            list.len(),
            inputs.len()
        );
    }

    match list {
        AnyImageList::Int(v) => save_all(v, inputs, out_dir),
        AnyImageList::Float(v) => save_all(v, inputs, out_dir),
        AnyImageList::Double(v) => save_all(v, inputs, out_dir),
    }
}

fn load_all<T: Element>(paths: &[PathBuf]) -> Result<Vec<Image<T>>> {
    paths.iter().map(|p| load_image(p)).collect()
}

fn save_all<T: Element>(
    images: &[Image<T>],
    inputs: &[PathBuf],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    images
        .iter()
        .zip(inputs)
        .map(|(image, input)| {
            let name = input
                .file_name()
                .with_context(|| format!("Input {} has no file name", input.display()))?;
            let target = out_dir.join(name);
            save_image(image, &target)?;
            Ok(target)
        })
        .collect()
}

//! Library for turning one high-resolution icon into the raster sizes an
//! application bundle needs, plus a multi-resolution Windows icon (.ico)
//! file.
//!
//! Decoding is done by the `image` crate and Lanczos resampling, with
//! premultiplied alpha, by `fast_image_resize`.  Standalone PNGs go through
//! `png`, and the ICO container is written by the `ico` crate.  See
//! https://en.wikipedia.org/wiki/ICO_(file_format) for more information
//! about the file format.
//!
//! ```no_run
//! use icon_builder::{BuildConfig, IconBuilder};
//! use std::path::Path;
//!
//! let config = BuildConfig::default().resolve_against(Path::new("src-tauri"));
//! let report = IconBuilder::new(config).build()?;
//! assert_eq!(report.container_sizes[0], 512);
//! # Ok::<(), icon_builder::BuildError>(())
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod pngio;
mod raster;
mod target;

pub use builder::{write_container, write_named_outputs, BuildReport, IconBuilder,
                  SourceImage, WrittenFile, RESIZE_FILTER};
pub use config::{choose_base_dir, BuildConfig, NamedOutput, DEFAULT_CONTAINER_SIZES};
pub use error::BuildError;
pub use raster::{PixelFormat, Raster};
pub use target::{largest_first, ResizeTarget};

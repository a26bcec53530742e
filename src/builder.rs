//! Resizes one source image into standalone rasters and an ICO container.
//!
//! A build runs in a fixed order: the configuration is checked, the source is
//! decoded and validated, the named outputs are written, and then the
//! container is written.  Nothing touches the filesystem until the source has
//! decoded successfully, so a missing source leaves no output behind.  A
//! failure part-way through writing aborts the remaining steps and leaves
//! whatever was already written.

use fast_image_resize as fr;
use image::{ColorType, DynamicImage, ImageError, ImageReader, RgbaImage};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{BuildConfig, NamedOutput};
use crate::error::BuildError;
use crate::raster::Raster;
use crate::target::ResizeTarget;

/// Resampling filter used for every derived raster.
pub const RESIZE_FILTER: fr::FilterType = fr::FilterType::Lanczos3;

/// A decoded source image, normalized to RGBA8.
pub struct SourceImage {
    pixels: RgbaImage,
    original_color: ColorType,
}

impl SourceImage {
    /// Decodes the image at `path`, guessing its format from the contents,
    /// and converts it to RGBA8.
    pub fn open(path: &Path) -> Result<SourceImage, BuildError> {
        let decode_error = |source: ImageError| BuildError::Decode {
            path: path.to_path_buf(),
            source,
        };
        let decoded = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| decode_error(ImageError::IoError(err)))?
            .decode()
            .map_err(decode_error)?;
        Ok(SourceImage::from_dynamic(decoded))
    }

    /// Normalizes an already-decoded image.  Non-RGBA8 buffers are converted
    /// once and the original buffer is dropped.
    pub fn from_dynamic(image: DynamicImage) -> SourceImage {
        let original_color = image.color();
        SourceImage {
            pixels: image.into_rgba8(),
            original_color,
        }
    }

    /// Returns the width of the source, in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Returns the height of the source, in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns the color type the source had before normalization.
    pub fn original_color(&self) -> ColorType {
        self.original_color
    }

    /// Returns the normalized RGBA8 pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Resamples the source to exactly `dimension` x `dimension` pixels with
    /// a Lanczos filter.  The source itself is left untouched.
    ///
    /// Color channels are multiplied by alpha before filtering and divided
    /// back afterwards, so fully transparent pixels contribute no color to
    /// their neighbors.
    pub fn derive(&self, dimension: u32) -> Result<Raster, BuildError> {
        if dimension == 0 {
            return Err(BuildError::Encode("cannot derive a 0x0 raster".to_string()));
        }
        let src = fr::images::Image::from_vec_u8(
            self.width(),
            self.height(),
            self.pixels.as_raw().clone(),
            fr::PixelType::U8x4,
        )
        .map_err(|err| BuildError::Encode(format!("cannot wrap source pixels: {}", err)))?;
        let mut dst = fr::images::Image::new(dimension, dimension, fr::PixelType::U8x4);

        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(RESIZE_FILTER))
            .use_alpha(true);
        fr::Resizer::new()
            .resize(&src, &mut dst, Some(&options))
            .map_err(|err| {
                BuildError::Encode(format!("cannot resample to {0}x{0}: {1}", dimension, err))
            })?;

        let resized = RgbaImage::from_raw(dimension, dimension, dst.into_vec())
            .ok_or_else(|| BuildError::Encode("resampled buffer has the wrong length".to_string()))?;
        Ok(Raster::from_rgba_image(resized))
    }
}

/// A file produced by a build.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WrittenFile {
    /// Where the file was written.
    pub path: PathBuf,
    /// Square size of the raster, for named outputs; the largest embedded
    /// size, for the container.
    pub dimension: u32,
    /// Size of the file on disk.
    pub bytes: u64,
}

/// What a completed build produced.
#[derive(Clone, Debug)]
pub struct BuildReport {
    /// Width and height of the decoded source.
    pub source_dimensions: (u32, u32),
    /// Color type of the source before normalization.
    pub source_color: ColorType,
    /// Standalone rasters, in configuration order.
    pub named: Vec<WrittenFile>,
    /// The ICO container.
    pub container: WrittenFile,
    /// Sizes embedded in the container, in file order.
    pub container_sizes: Vec<u32>,
}

/// Runs builds for one configuration.
pub struct IconBuilder {
    config: BuildConfig,
}

impl IconBuilder {
    /// Creates a builder.  Paths in `config` are used as given, so resolve
    /// them first if they are relative.
    pub fn new(config: BuildConfig) -> IconBuilder {
        IconBuilder { config }
    }

    /// Returns the configuration this builder runs.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Checks that every requested size can be encoded.
    pub fn validate_config(&self) -> Result<(), BuildError> {
        let named = self.config.named_outputs.iter().map(|out| out.dimension);
        if let Some(bad) = named.chain(self.config.container_sizes.iter().copied())
            .find(|&dimension| dimension == 0)
        {
            return Err(BuildError::Encode(format!("invalid icon size {}", bad)));
        }
        if self.config.container_sizes.len() > u16::MAX as usize {
            return Err(BuildError::Encode(format!(
                "{} container sizes requested, but an ICO file holds at most {}",
                self.config.container_sizes.len(),
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Decodes the configured source and validates it.
    pub fn load(&self) -> Result<SourceImage, BuildError> {
        log::info!("loading source image: {}", self.config.source.display());
        let source = SourceImage::open(&self.config.source)?;
        log::info!(
            "source image size: {}x{} ({:?})",
            source.width(),
            source.height(),
            source.original_color()
        );
        self.validate_source(&source)?;
        Ok(source)
    }

    /// Warns about (or, in strict mode, rejects) a source that is not square
    /// or is smaller than the largest requested size.
    pub fn validate_source(&self, source: &SourceImage) -> Result<(), BuildError> {
        let mut problems = Vec::new();
        if source.width() != source.height() {
            problems.push(format!(
                "source is {}x{}, not square; outputs will be stretched",
                source.width(),
                source.height()
            ));
        }
        if let Some(largest) = self.config.largest_dimension() {
            if source.width() < largest || source.height() < largest {
                problems.push(format!(
                    "source is {}x{}, smaller than requested size {}; outputs will be upscaled",
                    source.width(),
                    source.height(),
                    largest
                ));
            }
        }
        if self.config.strict && !problems.is_empty() {
            return Err(BuildError::InvalidSource(problems.join("; ")));
        }
        for problem in problems {
            log::warn!("{}", problem);
        }
        Ok(())
    }

    /// Runs the whole build and reports what was written.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        self.validate_config()?;
        let source = self.load()?;

        log::info!("generating PNG icons:");
        let named = write_named_outputs(&source, &self.config.named_outputs)?;

        log::info!("generating ICO icon:");
        let (container, container_sizes) =
            write_container(&source, &self.config.container_sizes, &self.config.container)?;

        log::info!("done");
        Ok(BuildReport {
            source_dimensions: (source.width(), source.height()),
            source_color: source.original_color(),
            named,
            container,
            container_sizes,
        })
    }
}

/// Derives and writes each output in order, overwriting existing files.
/// `.png` destinations use the crate's PNG writer at maximum compression; any
/// other extension is encoded by the `image` crate.
pub fn write_named_outputs(
    source: &SourceImage,
    outputs: &[NamedOutput],
) -> Result<Vec<WrittenFile>, BuildError> {
    let mut written = Vec::with_capacity(outputs.len());
    for output in outputs {
        let raster = source.derive(output.dimension)?;
        persist_raster(raster, &output.path)?;
        let bytes = file_size(&output.path)?;
        log::info!("  {}, {} bytes", ResizeTarget::from(output), bytes);
        written.push(WrittenFile {
            path: output.path.clone(),
            dimension: output.dimension,
            bytes,
        });
    }
    Ok(written)
}

/// Derives one raster per size and writes them all into a single ICO file,
/// largest first.  Returns the written file and the embedded sizes in file
/// order.
pub fn write_container(
    source: &SourceImage,
    sizes: &[u32],
    path: &Path,
) -> Result<(WrittenFile, Vec<u32>), BuildError> {
    let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
    for target in ResizeTarget::container_members(sizes) {
        let raster = source.derive(target.dimension())?;
        let image = ico::IconImage::from_rgba_data(
            raster.width(),
            raster.height(),
            raster.into_rgba_image().into_raw(),
        );
        let entry = ico::IconDirEntry::encode(&image)
            .map_err(|err| BuildError::from_io(path.to_path_buf(), err))?;
        log::debug!(
            "  {} encoded as {} at {} bpp, {} bytes",
            target,
            if entry.is_png() { "PNG" } else { "BMP" },
            entry.bits_per_pixel(),
            entry.data().len()
        );
        dir.add_entry(entry);
        log::info!("  adding {}", target);
    }

    let file = File::create(path).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    dir.write(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|err| BuildError::from_io(path.to_path_buf(), err))?;

    let bytes = file_size(path)?;
    let embedded: Vec<u32> = dir.entries().iter().map(|entry| entry.width()).collect();
    log::info!(
        "ICO file saved: {} ({} bytes), sizes {:?}",
        path.display(),
        bytes,
        embedded
    );
    let written = WrittenFile {
        path: path.to_path_buf(),
        dimension: embedded.first().copied().unwrap_or(0),
        bytes,
    };
    Ok((written, embedded))
}

fn persist_raster(raster: Raster, path: &Path) -> Result<(), BuildError> {
    if has_png_extension(path) {
        let file = File::create(path).map_err(|source| BuildError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        raster
            .write_png(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|err| BuildError::from_io(path.to_path_buf(), err))
    } else {
        raster.into_rgba_image().save(path).map_err(|err| match err {
            ImageError::IoError(source) => BuildError::Write {
                path: path.to_path_buf(),
                source,
            },
            other => BuildError::Encode(format!("{}: {}", path.display(), other)),
        })
    }
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn file_size(path: &Path) -> Result<u64, BuildError> {
    fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|source| BuildError::Write {
            path: path.to_path_buf(),
            source,
        })
}

//! Build configuration.
//!
//! All paths are stored as given and are only joined to a base directory by
//! [`BuildConfig::resolve_against`], which callers run once before any I/O.

use std::path::{Path, PathBuf};

/// Sizes embedded in the ICO container by default, in canonical ascending
/// order.
pub const DEFAULT_CONTAINER_SIZES: [u32; 8] = [16, 24, 32, 48, 64, 128, 256, 512];

/// A standalone raster output: one file at one square size.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamedOutput {
    /// Destination file.  The extension selects the encoder.
    pub path: PathBuf,
    /// Width and height of the output, in pixels.
    pub dimension: u32,
}

impl NamedOutput {
    /// Creates a named output.
    pub fn new<P: Into<PathBuf>>(path: P, dimension: u32) -> NamedOutput {
        NamedOutput {
            path: path.into(),
            dimension,
        }
    }
}

/// Everything the builder needs to know about one run.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// The high-resolution source image.
    pub source: PathBuf,
    /// Standalone raster outputs, written in order.
    pub named_outputs: Vec<NamedOutput>,
    /// Destination of the multi-resolution ICO file.
    pub container: PathBuf,
    /// Sizes embedded in the container.  Duplicates are embedded twice.
    pub container_sizes: Vec<u32>,
    /// Fail on a non-square source, or one smaller than the largest
    /// requested size, instead of warning and stretching.
    pub strict: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("icons/icon.png"),
            named_outputs: vec![
                NamedOutput::new("icons/32x32.png", 32),
                NamedOutput::new("icons/128x128.png", 128),
                NamedOutput::new("icons/128x128@2x.png", 256),
            ],
            container: PathBuf::from("icons/icon.ico"),
            container_sizes: DEFAULT_CONTAINER_SIZES.to_vec(),
            strict: false,
        }
    }
}

impl BuildConfig {
    /// Returns a copy with every relative path joined onto `base`.  Absolute
    /// paths are left alone.
    pub fn resolve_against(&self, base: &Path) -> BuildConfig {
        let resolve = |path: &Path| -> PathBuf {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base.join(path)
            }
        };
        BuildConfig {
            source: resolve(&self.source),
            named_outputs: self
                .named_outputs
                .iter()
                .map(|out| NamedOutput::new(resolve(&out.path), out.dimension))
                .collect(),
            container: resolve(&self.container),
            container_sizes: self.container_sizes.clone(),
            strict: self.strict,
        }
    }

    /// Returns the largest size any output asks for, or `None` if there are
    /// no outputs at all.
    pub fn largest_dimension(&self) -> Option<u32> {
        self.named_outputs
            .iter()
            .map(|out| out.dimension)
            .chain(self.container_sizes.iter().copied())
            .max()
    }
}

/// Picks the directory that relative configuration paths are resolved
/// against.  An explicit directory wins; otherwise the package directory that
/// `cargo run` exports as `CARGO_MANIFEST_DIR`; otherwise the directory
/// holding the executable.
pub fn choose_base_dir(
    explicit: Option<PathBuf>,
    manifest_dir: Option<PathBuf>,
    exe: Option<&Path>,
) -> Option<PathBuf> {
    explicit
        .or(manifest_dir)
        .or_else(|| exe.and_then(Path::parent).map(Path::to_path_buf))
}

use std::fmt;
use std::path::PathBuf;

use crate::config::NamedOutput;

/// A single requested output size.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResizeTarget {
    /// A standalone file at an explicit path.
    Named {
        /// Destination file.
        path: PathBuf,
        /// Width and height, in pixels.
        dimension: u32,
    },
    /// One image inside the ICO container.
    ContainerMember {
        /// Width and height, in pixels.
        dimension: u32,
    },
}

impl ResizeTarget {
    /// Returns the square size this target asks for.
    pub fn dimension(&self) -> u32 {
        match *self {
            ResizeTarget::Named { dimension, .. } => dimension,
            ResizeTarget::ContainerMember { dimension } => dimension,
        }
    }

    /// Lists container targets for `sizes`, largest first.  Equal sizes keep
    /// their relative order, so a canonical ascending list comes out exactly
    /// reversed.
    pub fn container_members(sizes: &[u32]) -> Vec<ResizeTarget> {
        largest_first(sizes)
            .into_iter()
            .map(|dimension| ResizeTarget::ContainerMember { dimension })
            .collect()
    }
}

impl<'a> From<&'a NamedOutput> for ResizeTarget {
    fn from(output: &'a NamedOutput) -> ResizeTarget {
        ResizeTarget::Named {
            path: output.path.clone(),
            dimension: output.dimension,
        }
    }
}

impl fmt::Display for ResizeTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResizeTarget::Named { ref path, dimension } => {
                write!(f, "{} ({}x{})", path.display(), dimension, dimension)
            }
            ResizeTarget::ContainerMember { dimension } => {
                write!(f, "{}x{}", dimension, dimension)
            }
        }
    }
}

/// Returns `sizes` sorted in descending order (stable).
pub fn largest_first(sizes: &[u32]) -> Vec<u32> {
    let mut sorted = sizes.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildConfig, DEFAULT_CONTAINER_SIZES};

    #[test]
    fn canonical_sizes_are_reversed() {
        let mut reversed = DEFAULT_CONTAINER_SIZES.to_vec();
        reversed.reverse();
        assert_eq!(largest_first(&DEFAULT_CONTAINER_SIZES), reversed);
    }

    #[test]
    fn unordered_sizes_still_put_largest_first() {
        assert_eq!(largest_first(&[48, 512, 16, 48]), vec![512, 48, 48, 16]);
    }

    #[test]
    fn targets_from_default_config() {
        let config = BuildConfig::default();
        let named = ResizeTarget::from(&config.named_outputs[2]);
        assert_eq!(named.dimension(), 256);
        assert_eq!(named.to_string(), "icons/128x128@2x.png (256x256)");
        let members = ResizeTarget::container_members(&config.container_sizes);
        assert_eq!(members.len(), 8);
        assert_eq!(members[0], ResizeTarget::ContainerMember { dimension: 512 });
        assert_eq!(members[7].to_string(), "16x16");
    }
}

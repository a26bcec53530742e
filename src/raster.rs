use image::RgbaImage;

/// A decoded raster, either derived from a source image or read back from a
/// PNG file.
#[derive(Clone)]
pub struct Raster {
    format: PixelFormat,
    width: u32,
    height: u32,
    data: Box<[u8]>,
}

impl Raster {
    /// Creates a new raster with all pixel data set to zero.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Raster {
        let data_bytes = format.bytes_per_pixel() as usize
            * width as usize
            * height as usize;
        Raster {
            format,
            width,
            height,
            data: vec![0u8; data_bytes].into_boxed_slice(),
        }
    }

    /// Wraps an RGBA buffer produced by the `image` crate without copying.
    pub fn from_rgba_image(image: RgbaImage) -> Raster {
        let (width, height) = image.dimensions();
        Raster {
            format: PixelFormat::RGBA,
            width,
            height,
            data: image.into_raw().into_boxed_slice(),
        }
    }

    /// Converts the raster into an `image::RgbaImage`, expanding to RGBA
    /// first if needed.
    pub fn into_rgba_image(self) -> RgbaImage {
        let rgba = self.into_rgba();
        match RgbaImage::from_raw(rgba.width, rgba.height, rgba.data.into_vec())
        {
            Some(image) => image,
            None => unreachable!(), // RGBA data is always 4 * width * height
        }
    }

    /// Creates a copy of this raster using the RGBA pixel format.  If the
    /// raster is already RGBA, this is equivalent to `clone()`.
    pub fn to_rgba(&self) -> Raster {
        self.clone().into_rgba()
    }

    /// Like [`to_rgba`](#method.to_rgba), but consumes the raster so that an
    /// RGBA buffer is passed through without a copy.
    pub fn into_rgba(self) -> Raster {
        let rgba_data = match self.format {
            PixelFormat::RGBA => self.data,
            PixelFormat::RGB => rgb_to_rgba(&self.data),
            PixelFormat::GrayAlpha => gray_alpha_to_rgba(&self.data),
            PixelFormat::Gray => gray_to_rgba(&self.data),
        };
        Raster {
            format: PixelFormat::RGBA,
            width: self.width,
            height: self.height,
            data: rgba_data,
        }
    }

    /// Returns the format in which this raster's pixel data is stored.
    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the width of the raster, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the raster, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a reference to the raster's pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the raster's pixel data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// A format for storing pixel data in a raster.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
    /// 32-bit color with alpha channel.
    RGBA,
    /// 24-bit color with no alpha.
    RGB,
    /// 16-bit grayscale-with-alpha.
    GrayAlpha,
    /// 8-bit grayscale with no alpha.
    Gray,
}

impl PixelFormat {
    /// Returns the number of bytes needed to store a single pixel in this
    /// format.
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            PixelFormat::RGBA => 4,
            PixelFormat::RGB => 3,
            PixelFormat::GrayAlpha => 2,
            PixelFormat::Gray => 1,
        }
    }
}

fn rgb_to_rgba(rgb: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba.into_boxed_slice()
}

fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks_exact(2) {
        let (value, alpha) = (pixel[0], pixel[1]);
        rgba.extend_from_slice(&[value, value, value, alpha]);
    }
    rgba.into_boxed_slice()
}

fn gray_to_rgba(gray: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.extend_from_slice(&[value, value, value, u8::MAX]);
    }
    rgba.into_boxed_slice()
}

use std::io::{self, BufRead, Error, ErrorKind, Seek, Write};

use crate::raster::{PixelFormat, Raster};

impl Raster {
    /// Reads a raster from a PNG file.
    pub fn read_png<R: BufRead + Seek>(input: R) -> io::Result<Raster> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(
            png::Transformations::STRIP_16 | png::Transformations::EXPAND,
        );
        let info = decoder.read_header_info()?;
        let (width, height) = (info.width, info.height);
        let mut reader = decoder.read_info()?;

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            let msg = format!("unsupported PNG bit depth: {:?}", bit_depth);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let pixel_format = match color_type {
            png::ColorType::Rgba => PixelFormat::RGBA,
            png::ColorType::Rgb => PixelFormat::RGB,
            png::ColorType::GrayscaleAlpha => PixelFormat::GrayAlpha,
            png::ColorType::Grayscale => PixelFormat::Gray,
            png::ColorType::Indexed => unreachable!(), // EXPAND prevents this
        };

        let mut raster = Raster::new(pixel_format, width, height);
        if reader.output_buffer_size() != Some(raster.data().len()) {
            return Err(Error::new(ErrorKind::InvalidData,
                                  "PNG frame size does not match header"));
        }
        reader.next_frame(raster.data_mut())?;
        reader.finish()?;
        Ok(raster)
    }

    /// Writes the raster to a PNG file at the given compression level.
    pub fn write_png_with<W: Write>(&self,
                                    output: W,
                                    compression: png::Compression)
                                    -> io::Result<()> {
        let color_type = match self.pixel_format() {
            PixelFormat::RGBA => png::ColorType::Rgba,
            PixelFormat::RGB => png::ColorType::Rgb,
            PixelFormat::GrayAlpha => png::ColorType::GrayscaleAlpha,
            PixelFormat::Gray => png::ColorType::Grayscale,
        };
        let mut encoder = png::Encoder::new(output, self.width(), self.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(compression);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.data())?;
        writer.finish()?;
        Ok(())
    }

    /// Writes the raster to a PNG file using the strongest compression.
    pub fn write_png<W: Write>(&self, output: W) -> io::Result<()> {
        self.write_png_with(output, png::Compression::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn checkerboard(size: u32) -> Raster {
        let mut raster = Raster::new(PixelFormat::RGBA, size, size);
        for (index, pixel) in raster.data_mut().chunks_exact_mut(4).enumerate() {
            let on = (index as u32 % size + index as u32 / size) % 2 == 0;
            let value = if on { 255 } else { 0 };
            pixel.copy_from_slice(&[value, value, value, 128]);
        }
        raster
    }

    #[test]
    fn written_png_reads_back_identically() {
        let raster = checkerboard(9);
        let mut encoded = Vec::new();
        raster.write_png(&mut encoded).expect("write failed");
        let decoded = Raster::read_png(Cursor::new(&encoded)).expect("read failed");
        assert_eq!(decoded.pixel_format(), PixelFormat::RGBA);
        assert_eq!(decoded.width(), 9);
        assert_eq!(decoded.height(), 9);
        assert!(decoded.data() == raster.data());
    }

    #[test]
    fn grayscale_png_reads_as_gray() {
        let mut raster = Raster::new(PixelFormat::Gray, 3, 2);
        raster.data_mut().copy_from_slice(&[0, 50, 100, 150, 200, 250]);
        let mut encoded = Vec::new();
        raster.write_png(&mut encoded).unwrap();
        let decoded = Raster::read_png(Cursor::new(&encoded)).unwrap();
        assert_eq!(decoded.pixel_format(), PixelFormat::Gray);
        assert_eq!(decoded.to_rgba().data()[4..8], [50, 50, 50, 255]);
    }

    #[test]
    fn truncated_png_fails_to_read() {
        let mut encoded = Vec::new();
        checkerboard(4).write_png(&mut encoded).unwrap();
        encoded.truncate(encoded.len() / 2);
        assert!(Raster::read_png(Cursor::new(&encoded)).is_err());
    }
}

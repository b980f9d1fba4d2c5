use std::io::{self, Write};
use std::ops::{Index, IndexMut};

use ndarray::Array2;

use crate::*;

/// Largest channel value written to PPM headers.
pub const PPM_MAX_VALUE: u8 = 255;

/// Raster of packed colors. Row `0` is the bottom of the displayed image.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pixels: Array2<Color>,
}

impl PixelBuffer {
    pub fn new(width: Px, height: Px, background: Color) -> Self {
        Self {
            pixels: Array2::from_elem([height, width], background),
        }
    }

    pub fn width(&self) -> Px {
        self.pixels.ncols()
    }

    pub fn height(&self) -> Px {
        self.pixels.nrows()
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Zeroes every pixel. Frame numbering lives in the sink and is not affected.
    pub fn reset(&mut self) {
        self.fill(Color::BLACK);
    }

    /// Pixels in scan order: top row first, left to right.
    pub fn iter_scan(&self) -> impl Iterator<Item = Color> + '_ {
        self.pixels
            .outer_iter()
            .rev()
            .flat_map(|row| row.into_iter().copied())
    }

    /// Serializes as plain PPM (`P3`), one `R G B` line per pixel.
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(
            writer,
            "P3\n{}\n{}\n{}\n",
            self.width(),
            self.height(),
            PPM_MAX_VALUE
        )?;
        for color in self.iter_scan() {
            writeln!(writer, "{color}")?;
        }
        writer.flush()
    }

    pub fn to_ppm_string(&self) -> String {
        let mut out = Vec::new();
        self.write_ppm(&mut out)
            .expect("writing to a Vec never fails");
        String::from_utf8(out).expect("PPM output is ASCII")
    }

    /// Parses a plain PPM image written by [`PixelBuffer::write_ppm`].
    ///
    /// The pixel data is checked against the header before the buffer is allocated.
    pub fn from_ppm(text: &str) -> Result<Self> {
        let mut tokens = text.split_ascii_whitespace();
        if tokens.next() != Some("P3") {
            return Err(Error::MalformedFrame("missing P3 tag"));
        }
        let mut next_number = |what: &'static str| -> Result<usize> {
            tokens
                .next()
                .ok_or(Error::MalformedFrame(what))?
                .parse()
                .map_err(|_| Error::MalformedFrame(what))
        };

        let width = next_number("bad width")?;
        let height = next_number("bad height")?;
        if next_number("bad max value")? != usize::from(PPM_MAX_VALUE) {
            return Err(Error::MalformedFrame("unsupported max value"));
        }
        let channel_count = width
            .checked_mul(height)
            .filter(|_| isize::try_from(width).is_ok() && isize::try_from(height).is_ok())
            .and_then(|pixels| pixels.checked_mul(3))
            .ok_or(Error::MalformedFrame("image too large"))?;

        let channels = tokens
            .map(|token| {
                let value: usize = token
                    .parse()
                    .map_err(|_| Error::MalformedFrame("bad channel value"))?;
                u8::try_from(value).map_err(|_| Error::MalformedFrame("channel out of range"))
            })
            .collect::<Result<Vec<u8>>>()?;
        if channels.len() < channel_count {
            return Err(Error::MalformedFrame("truncated pixel data"));
        }
        if channels.len() > channel_count {
            return Err(Error::MalformedFrame("trailing data"));
        }

        // scan order starts at the top row
        let pixels = Array2::from_shape_fn([height, width], |(y, x)| {
            let offset = 3 * ((height - 1 - y) * width + x);
            Color::rgb(channels[offset], channels[offset + 1], channels[offset + 2])
        });
        Ok(Self { pixels })
    }
}

impl Index<(Px, Px)> for PixelBuffer {
    type Output = Color;

    fn index(&self, (x, y): (Px, Px)) -> &Self::Output {
        &self.pixels[[y, x]]
    }
}

impl IndexMut<(Px, Px)> for PixelBuffer {
    fn index_mut(&mut self, (x, y): (Px, Px)) -> &mut Self::Output {
        &mut self.pixels[[y, x]]
    }
}

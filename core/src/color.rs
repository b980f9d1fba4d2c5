use core::fmt;

use serde::{Deserialize, Serialize};

/// Channel value every channel of [`Color::GRAY`] carries.
pub const GRAY_FACTOR: u8 = 190;

const RED_UNIT: u32 = 256 * 256;
const GREEN_UNIT: u32 = 256;

/// Packed 24-bit RGB color, `0xRRGGBB`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(GRAY_FACTOR, GRAY_FACTOR, GRAY_FACTOR);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(red as u32 * RED_UNIT + green as u32 * GREEN_UNIT + blue as u32)
    }

    pub const fn red(self) -> u8 {
        (self.0 / RED_UNIT) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 % RED_UNIT / GREEN_UNIT) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 % GREEN_UNIT) as u8
    }

    pub const fn channels(self) -> [u8; 3] {
        [self.red(), self.green(), self.blue()]
    }

    /// Moves every channel two thirds of the way toward [`GRAY_FACTOR`].
    pub const fn fade_to_gray(self) -> Self {
        Self::rgb(
            fade_channel(self.red()),
            fade_channel(self.green()),
            fade_channel(self.blue()),
        )
    }
}

/// `floor(2/3 * GRAY_FACTOR + 1/3 * value)`, exact in integers.
pub const fn fade_channel(value: u8) -> u8 {
    ((2 * GRAY_FACTOR as u16 + value as u16) / 3) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.red(), self.green(), self.blue())
    }
}

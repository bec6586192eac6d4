use serde::{Deserialize, Serialize};

/// A packed voxel color: `0xRRGGBBAA` byte order.
///
/// The low 8 bits are reserved and carry no meaning for interchange;
/// they are masked off before any color comparison. A raw value of 0
/// is indistinguishable from an empty cell, so grids never store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelColor(u32);

impl VoxelColor {
    /// Opaque white. Also the sentinel written to unused palette slots.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Pack three channel bytes; the reserved low byte is left zero.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self((r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The color with the reserved byte masked to zero. All palette
    /// lookups and equality checks go through this.
    pub const fn rgb(self) -> u32 {
        self.0 & 0xFFFF_FF00
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_accessors() {
        let c = VoxelColor::from_rgb(0x10, 0x20, 0x30);
        assert_eq!(c.r(), 0x10);
        assert_eq!(c.g(), 0x20);
        assert_eq!(c.b(), 0x30);
        assert_eq!(c.raw(), 0x1020_3000);
    }

    #[test]
    fn test_reserved_byte_masked() {
        let a = VoxelColor::from_raw(0x1020_30FF);
        let b = VoxelColor::from_raw(0x1020_3001);
        assert_eq!(a.rgb(), b.rgb());
        assert_eq!(a.rgb(), 0x1020_3000);
    }

    #[test]
    fn test_white_sentinel() {
        assert_eq!(VoxelColor::WHITE.raw(), 0xFFFF_FFFF);
        assert_eq!(VoxelColor::WHITE.rgb(), 0xFFFF_FF00);
    }
}

use std::collections::HashMap;

use carve_core::VoxelStore;

use crate::error::VoxError;
use crate::format::MAX_PALETTE_COLORS;

/// Palette and cell count gathered from one full scan of a document.
///
/// Index assignment is first-occurrence order under a fixed traversal:
/// z outer, y middle, x inner. That order fixes the byte layout of the
/// written palette chunk, so it must not change. The voxel count comes
/// from the same traversal that assigns indices, which guarantees the
/// XYZI count header always matches the records actually emitted.
pub struct PaletteScan {
    colors: Vec<u32>,
    index_of: HashMap<u32, usize>,
    voxel_count: u32,
}

impl PaletteScan {
    /// Scan the whole grid once. Fails if the model uses more distinct
    /// colors than the palette can hold; nothing may be written to the
    /// output before this check passes.
    pub fn scan(grid: &impl VoxelStore) -> Result<Self, VoxError> {
        let mut colors = Vec::new();
        let mut index_of = HashMap::new();
        let mut voxel_count = 0u32;

        let size = grid.size();
        for z in 0..size.z {
            for y in 0..size.y {
                for x in 0..size.x {
                    let Some(color) = grid.get(x, y, z) else {
                        continue;
                    };
                    voxel_count += 1;
                    let rgb = color.rgb();
                    if !index_of.contains_key(&rgb) {
                        index_of.insert(rgb, colors.len());
                        colors.push(rgb);
                    }
                }
            }
        }

        if colors.len() > MAX_PALETTE_COLORS {
            return Err(VoxError::PaletteOverflow(colors.len()));
        }

        Ok(Self {
            colors,
            index_of,
            voxel_count,
        })
    }

    /// Palette index for a masked color, in slot order.
    pub fn index_of(&self, rgb: u32) -> Option<u8> {
        self.index_of.get(&rgb).map(|&i| i as u8)
    }

    /// Distinct colors, in the order their slots were assigned.
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// Non-empty cells seen by the scan.
    pub fn voxel_count(&self) -> u32 {
        self.voxel_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carve_core::{VoxelColor, VoxelGrid};

    #[test]
    fn test_first_occurrence_order() {
        let mut grid = VoxelGrid::new(3, 3, 3);
        // Cells are edited in a different order than the z, y, x
        // traversal visits them; index assignment follows the
        // traversal, not the edits.
        grid.set(0, 0, 1, VoxelColor::from_rgb(3, 3, 3));
        grid.set(1, 0, 0, VoxelColor::from_rgb(1, 1, 1));
        grid.set(0, 1, 0, VoxelColor::from_rgb(2, 2, 2));

        let scan = PaletteScan::scan(&grid).expect("scan");
        assert_eq!(
            scan.colors(),
            &[
                VoxelColor::from_rgb(1, 1, 1).rgb(),
                VoxelColor::from_rgb(2, 2, 2).rgb(),
                VoxelColor::from_rgb(3, 3, 3).rgb(),
            ]
        );
        assert_eq!(scan.index_of(VoxelColor::from_rgb(2, 2, 2).rgb()), Some(1));
        assert_eq!(scan.voxel_count(), 3);
    }

    #[test]
    fn test_reserved_byte_does_not_split_colors() {
        let mut grid = VoxelGrid::new(2, 1, 1);
        grid.set(0, 0, 0, VoxelColor::from_raw(0x1020_30FF));
        grid.set(1, 0, 0, VoxelColor::from_raw(0x1020_3001));

        let scan = PaletteScan::scan(&grid).expect("scan");
        assert_eq!(scan.color_count(), 1);
        assert_eq!(scan.voxel_count(), 2);
    }

    #[test]
    fn test_max_palette_colors_accepted() {
        let mut grid = VoxelGrid::new(16, 16, 1);
        for i in 0..255u32 {
            let c = VoxelColor::from_rgb(i as u8, 0, 1);
            grid.set(i % 16, i / 16, 0, c);
        }
        let scan = PaletteScan::scan(&grid).expect("255 colors fit");
        assert_eq!(scan.color_count(), 255);
    }

    #[test]
    fn test_palette_overflow_rejected() {
        let mut grid = VoxelGrid::new(16, 16, 1);
        for i in 0..256u32 {
            let c = VoxelColor::from_rgb(i as u8, 0, 1);
            grid.set(i % 16, i / 16, 0, c);
        }
        let result = PaletteScan::scan(&grid);
        assert!(matches!(result, Err(VoxError::PaletteOverflow(256))));
    }

    #[test]
    fn test_empty_grid() {
        let grid = VoxelGrid::new(4, 4, 4);
        let scan = PaletteScan::scan(&grid).expect("scan");
        assert_eq!(scan.color_count(), 0);
        assert_eq!(scan.voxel_count(), 0);
    }
}

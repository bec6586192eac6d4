use crate::color::VoxelColor;
use crate::store::VoxelStore;

/// Default scene dimensions for a new document.
pub const DEFAULT_WIDTH: u32 = 10;
pub const DEFAULT_HEIGHT: u32 = 10;
pub const DEFAULT_DEPTH: u32 = 10;

/// Dense bounded voxel document.
///
/// Row-major storage, x fastest: index = (z * height + y) * width + x.
/// A cell holding raw 0 is empty.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    width: u32,
    height: u32,
    depth: u32,
    cells: Vec<u32>,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_DEPTH)
    }
}

impl VoxelGrid {
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
            cells: vec![0; width as usize * height as usize * depth as usize],
        }
    }

    fn index(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        if x < self.width && y < self.height && z < self.depth {
            let (w, h) = (self.width as usize, self.height as usize);
            Some((z as usize * h + y as usize) * w + x as usize)
        } else {
            None
        }
    }

    /// Number of non-empty cells.
    pub fn voxel_count(&self) -> u32 {
        self.cells.iter().filter(|&&c| c != 0).count() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }
}

impl VoxelStore for VoxelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn depth(&self) -> u32 {
        self.depth
    }

    fn get(&self, x: u32, y: u32, z: u32) -> Option<VoxelColor> {
        let raw = self.index(x, y, z).map(|i| self.cells[i])?;
        if raw == 0 {
            None
        } else {
            Some(VoxelColor::from_raw(raw))
        }
    }

    fn set(&mut self, x: u32, y: u32, z: u32, color: VoxelColor) {
        if let Some(i) = self.index(x, y, z) {
            self.cells[i] = color.raw();
        }
    }

    fn resize(&mut self, width: u32, height: u32, depth: u32) {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self.cells = vec![0; width as usize * height as usize * depth as usize];
    }

    fn clear(&mut self) {
        self.cells.fill(0);
    }
}

use glam::UVec3;

use crate::color::VoxelColor;

/// Access contract between a voxel document and its collaborators
/// (the interchange codec, mesh builders, tools).
///
/// Implementations own the storage; callers only ever hold a transient
/// reference — read-only for export, mutable for import. Callers must
/// serialize access against concurrent mutation of the same document.
pub trait VoxelStore {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn depth(&self) -> u32;

    /// Color at (x, y, z), or None for an empty or out-of-bounds cell.
    fn get(&self, x: u32, y: u32, z: u32) -> Option<VoxelColor>;

    /// Write a color at (x, y, z). Out-of-bounds writes are ignored.
    fn set(&mut self, x: u32, y: u32, z: u32, color: VoxelColor);

    /// Reallocate to the given dimensions, discarding all contents.
    fn resize(&mut self, width: u32, height: u32, depth: u32);

    /// Empty every cell without changing dimensions.
    fn clear(&mut self);

    fn size(&self) -> UVec3 {
        UVec3::new(self.width(), self.height(), self.depth())
    }

    /// Diagnostic side-channel. Hosts with a status bar override this;
    /// it never affects control flow.
    fn warning(&self, message: &str) {
        log::warn!("{message}");
    }
}

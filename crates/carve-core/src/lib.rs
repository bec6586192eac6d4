pub mod color;
pub mod grid;
pub mod store;

pub use color::VoxelColor;
pub use grid::VoxelGrid;
pub use store::VoxelStore;

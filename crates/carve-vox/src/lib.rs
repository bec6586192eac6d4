pub mod chunk;
pub mod error;
pub mod format;
pub mod load;
pub mod palette;
pub mod save;

pub use error::VoxError;
pub use load::{load, load_from};
pub use palette::PaletteScan;
pub use save::{save, save_into};

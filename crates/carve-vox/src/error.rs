/// Errors that can occur during voxel container import/export.
#[derive(Debug, thiserror::Error)]
pub enum VoxError {
    #[error("not a recognized voxel container (expected VOX magic)")]
    InvalidMagic,

    #[error("truncated chunk header")]
    TruncatedHeader,

    #[error("truncated {tag} chunk")]
    TruncatedChunk { tag: String },

    #[error("invalid {tag} chunk size: expected {expected} bytes, got {actual}")]
    ChunkSizeMismatch {
        tag: String,
        expected: u32,
        actual: u32,
    },

    #[error("model uses {0} distinct colors, which exceeds the 255-entry palette")]
    PaletteOverflow(usize),

    #[error("model too large: {width}x{height}x{depth} (max 127 per axis)")]
    DimensionTooLarge { width: u32, height: u32, depth: u32 },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Magic bytes identifying a MagicaVoxel container.
pub const MAGIC: [u8; 4] = *b"VOX ";

/// Container version written on export. Read permissively on import.
pub const FILE_VERSION: u32 = 150;

/// Root container chunk.
pub const TAG_MAIN: [u8; 4] = *b"MAIN";

/// Model dimension chunk.
pub const TAG_SIZE: [u8; 4] = *b"SIZE";

/// Palette chunk.
pub const TAG_RGBA: [u8; 4] = *b"RGBA";

/// Voxel list chunk.
pub const TAG_XYZI: [u8; 4] = *b"XYZI";

/// Bytes per chunk header: 4-byte tag + content length + children length.
pub const CHUNK_HEADER_SIZE: u32 = 12;

/// SIZE payload: width, height, depth as little-endian u32.
pub const SIZE_PAYLOAD_SIZE: u32 = 12;

/// Number of palette slots in the on-disk table.
pub const PALETTE_SLOTS: usize = 256;

/// RGBA payload: 256 four-byte entries, always written in full.
pub const RGBA_PAYLOAD_SIZE: u32 = (PALETTE_SLOTS * 4) as u32;

/// Distinct colors a model may use. Slot 255 stays unused, so valid
/// palette indices are 0..=254.
pub const MAX_PALETTE_COLORS: usize = PALETTE_SLOTS - 1;

/// Bytes per voxel record: x, z, y, palette index.
pub const VOXEL_RECORD_SIZE: u32 = 4;

/// Largest width/height/depth the format accepts.
pub const MAX_DIMENSION: u32 = 127;

/// Opaque white. Fills unused palette slots and resolves voxel records
/// whose palette index was never populated.
pub const SENTINEL_COLOR: u32 = 0xFFFF_FFFF;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_payload_covers_full_table() {
        assert_eq!(RGBA_PAYLOAD_SIZE, 1024);
    }

    #[test]
    fn test_palette_leaves_last_slot_unused() {
        assert_eq!(MAX_PALETTE_COLORS, 255);
    }
}

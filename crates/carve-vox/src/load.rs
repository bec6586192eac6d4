use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use carve_core::{VoxelColor, VoxelStore};

use crate::chunk::{self, read_u32, ChunkKind};
use crate::error::VoxError;
use crate::format::*;

fn truncated(tag: [u8; 4]) -> VoxError {
    VoxError::TruncatedChunk {
        tag: String::from_utf8_lossy(&tag).into_owned(),
    }
}

fn read_payload<R: Read>(r: &mut R, buf: &mut [u8], tag: [u8; 4]) -> Result<(), VoxError> {
    r.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            truncated(tag)
        } else {
            VoxError::Io(e)
        }
    })
}

/// Reconstruct a voxel document from a container stream.
///
/// The grid is resized exactly once, when the SIZE chunk arrives;
/// RGBA fills the palette table; XYZI writes the cells, swapping the
/// file's (x, z, y) record order back to in-memory (x, y, z). Unknown
/// chunks are skipped by their declared lengths. A failure after the
/// resize leaves the grid partially populated; presenting a clean
/// slate on error is the host's concern.
pub fn load_from<S, R>(grid: &mut S, mut r: R) -> Result<(), VoxError>
where
    S: VoxelStore,
    R: Read,
{
    // Pre-filled with the sentinel so records that reference a slot no
    // palette chunk ever populated resolve to opaque white.
    let mut palette = [SENTINEL_COLOR; PALETTE_SLOTS];

    chunk::walk(&mut r, |r, kind, header| match kind {
        ChunkKind::Size => {
            if header.content_len != SIZE_PAYLOAD_SIZE {
                return Err(VoxError::ChunkSizeMismatch {
                    tag: "SIZE".into(),
                    expected: SIZE_PAYLOAD_SIZE,
                    actual: header.content_len,
                });
            }
            let width = read_u32(r)?;
            let height = read_u32(r)?;
            let depth = read_u32(r)?;
            if width > MAX_DIMENSION || height > MAX_DIMENSION || depth > MAX_DIMENSION {
                return Err(VoxError::DimensionTooLarge {
                    width,
                    height,
                    depth,
                });
            }
            grid.resize(width, height, depth);
            Ok(())
        }
        ChunkKind::Rgba => {
            if header.content_len != RGBA_PAYLOAD_SIZE {
                return Err(VoxError::ChunkSizeMismatch {
                    tag: "RGBA".into(),
                    expected: RGBA_PAYLOAD_SIZE,
                    actual: header.content_len,
                });
            }
            let mut buf = [0u8; RGBA_PAYLOAD_SIZE as usize];
            read_payload(r, &mut buf, TAG_RGBA)?;
            let entries: &[[u8; 4]] = bytemuck::cast_slice(&buf);
            for (slot, e) in entries.iter().enumerate() {
                palette[slot] = (e[0] as u32) << 24
                    | (e[1] as u32) << 16
                    | (e[2] as u32) << 8
                    | e[3] as u32;
            }
            Ok(())
        }
        ChunkKind::Xyzi => {
            let count = read_u32(r)?;
            for _ in 0..count {
                let mut record = [0u8; VOXEL_RECORD_SIZE as usize];
                read_payload(r, &mut record, TAG_XYZI)?;
                let [fx, fz, fy, index] = record;
                let color = palette[index as usize];
                grid.set(
                    fx as u32,
                    fy as u32,
                    fz as u32,
                    VoxelColor::from_raw(color),
                );
            }
            Ok(())
        }
        ChunkKind::Unknown { content_len, .. } => chunk::skip(r, content_len as u64, header.tag),
    })
}

/// Load a document from a file. The handle is released on every exit
/// path, including errors.
pub fn load<S: VoxelStore>(grid: &mut S, path: impl AsRef<Path>) -> Result<(), VoxError> {
    let file = File::open(path)?;
    load_from(grid, BufReader::new(file))
}

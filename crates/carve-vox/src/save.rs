use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use carve_core::VoxelStore;

use crate::chunk::{write_u32, ChunkHeader};
use crate::error::VoxError;
use crate::format::*;
use crate::palette::PaletteScan;

/// Serialize a voxel document into the container format.
///
/// Layout: magic + version, MAIN, then SIZE, RGBA and XYZI in that
/// order, all with zero children. Fails before writing a single byte
/// if the model exceeds the palette or dimension capacity; any write
/// failure afterwards aborts with no partial-file cleanup.
pub fn save_into<S, W>(grid: &S, mut w: W) -> Result<(), VoxError>
where
    S: VoxelStore,
    W: Write,
{
    let size = grid.size();
    if size.x > MAX_DIMENSION || size.y > MAX_DIMENSION || size.z > MAX_DIMENSION {
        return Err(VoxError::DimensionTooLarge {
            width: size.x,
            height: size.y,
            depth: size.z,
        });
    }

    let scan = PaletteScan::scan(grid)?;
    grid.warning(&format!(
        "model uses {} distinct colors",
        scan.color_count()
    ));
    log::info!(
        "exporting {} voxels, {} palette entries",
        scan.voxel_count(),
        scan.color_count()
    );

    let xyzi_content = 4 + scan.voxel_count() * VOXEL_RECORD_SIZE;
    let children = (CHUNK_HEADER_SIZE + SIZE_PAYLOAD_SIZE)
        + (CHUNK_HEADER_SIZE + RGBA_PAYLOAD_SIZE)
        + (CHUNK_HEADER_SIZE + xyzi_content);

    w.write_all(&MAGIC)?;
    write_u32(&mut w, FILE_VERSION)?;
    ChunkHeader::new(TAG_MAIN, 0, children).write(&mut w)?;

    // SIZE
    ChunkHeader::new(TAG_SIZE, SIZE_PAYLOAD_SIZE, 0).write(&mut w)?;
    write_u32(&mut w, size.x)?;
    write_u32(&mut w, size.y)?;
    write_u32(&mut w, size.z)?;

    // RGBA: assigned slots carry the color with opacity forced to 0xFF,
    // every unused slot carries the opaque-white sentinel.
    ChunkHeader::new(TAG_RGBA, RGBA_PAYLOAD_SIZE, 0).write(&mut w)?;
    let mut table = [[0xFFu8; 4]; PALETTE_SLOTS];
    for (slot, &rgb) in scan.colors().iter().enumerate() {
        table[slot] = [(rgb >> 24) as u8, (rgb >> 16) as u8, (rgb >> 8) as u8, 0xFF];
    }
    w.write_all(bytemuck::cast_slice(&table))?;

    // XYZI: the same traversal the scan used, so the count header and
    // the emitted records can never diverge. File records swap the
    // in-memory y and z axes.
    ChunkHeader::new(TAG_XYZI, xyzi_content, 0).write(&mut w)?;
    write_u32(&mut w, scan.voxel_count())?;
    for z in 0..size.z {
        for y in 0..size.y {
            for x in 0..size.x {
                let Some(color) = grid.get(x, y, z) else {
                    continue;
                };
                let index = scan.index_of(color.rgb()).unwrap_or(0);
                w.write_all(&[x as u8, z as u8, y as u8, index])?;
            }
        }
    }

    Ok(())
}

/// Save a document to a file. The handle is released on every exit
/// path, including errors.
pub fn save<S: VoxelStore>(grid: &S, path: impl AsRef<Path>) -> Result<(), VoxError> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    save_into(grid, &mut w)?;
    w.flush()?;
    Ok(())
}

use std::io::{self, Read, Write};

use crate::error::VoxError;
use crate::format::{CHUNK_HEADER_SIZE, MAGIC, TAG_RGBA, TAG_SIZE, TAG_XYZI};

/// Read a little-endian u32. A stream that ends before the field is
/// complete reads as zero; only real I/O failures are errors. Callers
/// that need a hard truncation check read whole structures instead.
pub fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        match r.read(&mut buf[filled..]) {
            Ok(0) => return Ok(0),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(u32::from_le_bytes(buf))
}

/// Write a little-endian u32, independent of host byte order.
pub fn write_u32<W: Write>(w: &mut W, value: u32) -> io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

/// Discard exactly `n` payload bytes of the named chunk.
pub fn skip<R: Read>(r: &mut R, n: u64, tag: [u8; 4]) -> Result<(), VoxError> {
    let copied = io::copy(&mut r.by_ref().take(n), &mut io::sink())?;
    if copied != n {
        return Err(VoxError::TruncatedChunk {
            tag: String::from_utf8_lossy(&tag).into_owned(),
        });
    }
    Ok(())
}

/// One chunk header: tag plus the two declared lengths. `content_len`
/// covers the chunk's own payload, `children_len` the payloads and
/// headers of any nested chunks that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: [u8; 4],
    pub content_len: u32,
    pub children_len: u32,
}

impl ChunkHeader {
    pub fn new(tag: [u8; 4], content_len: u32, children_len: u32) -> Self {
        Self {
            tag,
            content_len,
            children_len,
        }
    }

    /// Read a full 12-byte header. An incomplete header at a position
    /// where one is required is malformed, not end-of-data.
    pub fn read<R: Read>(r: &mut R) -> Result<Self, VoxError> {
        let mut buf = [0u8; CHUNK_HEADER_SIZE as usize];
        r.read_exact(&mut buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                VoxError::TruncatedHeader
            } else {
                VoxError::Io(e)
            }
        })?;
        Ok(Self {
            tag: [buf[0], buf[1], buf[2], buf[3]],
            content_len: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            children_len: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        })
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.tag)?;
        write_u32(w, self.content_len)?;
        write_u32(w, self.children_len)
    }

    /// Total bytes this chunk occupies in the stream.
    pub fn total_len(&self) -> u64 {
        CHUNK_HEADER_SIZE as u64 + self.content_len as u64 + self.children_len as u64
    }
}

/// Chunk tags this codec understands. Everything else is skipped by
/// its declared lengths and never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Size,
    Rgba,
    Xyzi,
    Unknown { content_len: u32, children_len: u32 },
}

impl ChunkKind {
    pub fn classify(header: &ChunkHeader) -> Self {
        match header.tag {
            TAG_SIZE => Self::Size,
            TAG_RGBA => Self::Rgba,
            TAG_XYZI => Self::Xyzi,
            _ => Self::Unknown {
                content_len: header.content_len,
                children_len: header.children_len,
            },
        }
    }
}

/// Walk a container stream: validate the magic, read the version, then
/// visit every child of the root chunk in order.
///
/// The handler must consume exactly `content_len` payload bytes for
/// each chunk it is given; the walker itself discards any declared
/// children bytes afterwards, so the cursor always lands on the next
/// sibling header. The walk ends when the root's declared byte budget
/// is exhausted. Budget arithmetic saturates, so oversized declared
/// lengths terminate the walk instead of wrapping.
pub fn walk<R, F>(r: &mut R, mut handle: F) -> Result<(), VoxError>
where
    R: Read,
    F: FnMut(&mut R, ChunkKind, &ChunkHeader) -> Result<(), VoxError>,
{
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            VoxError::InvalidMagic
        } else {
            VoxError::Io(e)
        }
    })?;
    if magic != MAGIC {
        return Err(VoxError::InvalidMagic);
    }

    let version = read_u32(r)?;
    log::debug!("voxel container version {version}");

    let root = ChunkHeader::read(r)?;
    let mut remaining = root.content_len as u64 + root.children_len as u64;
    while remaining > 0 {
        let header = ChunkHeader::read(r)?;
        handle(r, ChunkKind::classify(&header), &header)?;
        skip(r, header.children_len as u64, header.tag)?;
        remaining = remaining.saturating_sub(header.total_len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FILE_VERSION;

    #[test]
    fn test_read_u32_little_endian() {
        let mut cursor = &[0x78, 0x56, 0x34, 0x12][..];
        assert_eq!(read_u32(&mut cursor).expect("read"), 0x1234_5678);
    }

    #[test]
    fn test_read_u32_truncated_reads_zero() {
        let mut cursor = &[0xAB, 0xCD][..];
        assert_eq!(read_u32(&mut cursor).expect("read"), 0);
    }

    #[test]
    fn test_write_u32_byte_order() {
        let mut out = Vec::new();
        write_u32(&mut out, 0x1234_5678).expect("write");
        assert_eq!(out, [0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_header_roundtrip() {
        let header = ChunkHeader::new(*b"SIZE", 12, 0);
        let mut out = Vec::new();
        header.write(&mut out).expect("write");
        assert_eq!(out.len(), CHUNK_HEADER_SIZE as usize);

        let read_back = ChunkHeader::read(&mut &out[..]).expect("read");
        assert_eq!(read_back, header);
    }

    #[test]
    fn test_incomplete_header_is_malformed() {
        let result = ChunkHeader::read(&mut &b"SIZ"[..]);
        assert!(matches!(result, Err(VoxError::TruncatedHeader)));
    }

    #[test]
    fn test_classify_tags() {
        let kind = ChunkKind::classify(&ChunkHeader::new(*b"NOTE", 7, 3));
        assert_eq!(
            kind,
            ChunkKind::Unknown {
                content_len: 7,
                children_len: 3
            }
        );
        assert_eq!(
            ChunkKind::classify(&ChunkHeader::new(*b"XYZI", 4, 0)),
            ChunkKind::Xyzi
        );
    }

    #[test]
    fn test_walk_visits_siblings_in_order() {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC);
        write_u32(&mut data, FILE_VERSION).expect("write");
        // Root: two children, 12 + 4 bytes and 12 + 0 bytes.
        ChunkHeader::new(*b"MAIN", 0, 28).write(&mut data).expect("write");
        ChunkHeader::new(*b"NOTE", 4, 0).write(&mut data).expect("write");
        data.extend_from_slice(b"misc");
        ChunkHeader::new(*b"SIZE", 0, 0).write(&mut data).expect("write");

        let mut seen = Vec::new();
        walk(&mut &data[..], |r, kind, header| {
            seen.push(kind);
            skip(r, header.content_len as u64, header.tag)
        })
        .expect("walk");

        assert_eq!(
            seen,
            vec![
                ChunkKind::Unknown {
                    content_len: 4,
                    children_len: 0
                },
                ChunkKind::Size,
            ]
        );
    }

    #[test]
    fn test_walk_rejects_bad_magic() {
        let mut data = Vec::new();
        data.extend_from_slice(b"NOPE");
        write_u32(&mut data, FILE_VERSION).expect("write");
        let result = walk(&mut &data[..], |_, _, _| Ok(()));
        assert!(matches!(result, Err(VoxError::InvalidMagic)));
    }

    #[test]
    fn test_walk_rejects_missing_child_header() {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC);
        write_u32(&mut data, FILE_VERSION).expect("write");
        // Root declares more bytes than the stream holds.
        ChunkHeader::new(*b"MAIN", 0, 64).write(&mut data).expect("write");
        let result = walk(&mut &data[..], |_, _, _| Ok(()));
        assert!(matches!(result, Err(VoxError::TruncatedHeader)));
    }
}

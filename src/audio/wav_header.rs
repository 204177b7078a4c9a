//! Repairs for slightly nonstandard WAV headers that hound rejects.

const RIFF_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;
/// `WAVEFORMATEX` body with `cbSize` present.
const EXTENDED_FMT_LEN: usize = 18;

/// Rewrite known-benign header quirks so strict readers accept the file.
///
/// Only a PCM or IEEE float `fmt ` chunk with `cbSize == 0` followed by zero
/// padding is touched: it is shrunk to 18 bytes and the RIFF size is fixed.
/// Anything else is returned unchanged.
pub(crate) fn repair_wav_header(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.len() < RIFF_HEADER_LEN || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return bytes;
    }
    let mut offset = RIFF_HEADER_LEN;
    while let Some(size) = read_u32(&bytes, offset + 4) {
        let size = size as usize;
        let body = offset + CHUNK_HEADER_LEN;
        if body + size > bytes.len() {
            break;
        }
        if &bytes[offset..offset + 4] == b"fmt " {
            shrink_padded_fmt_chunk(&mut bytes, offset, size);
            break;
        }
        offset = body + size + size % 2;
    }
    bytes
}

fn shrink_padded_fmt_chunk(bytes: &mut Vec<u8>, chunk: usize, size: usize) {
    if size <= EXTENDED_FMT_LEN || size % 2 != 0 {
        return;
    }
    let body = chunk + CHUNK_HEADER_LEN;
    let (Some(format_tag), Some(cb_size)) = (read_u16(bytes, body), read_u16(bytes, body + 16))
    else {
        return;
    };
    // 1 = PCM, 3 = IEEE float.
    if !matches!(format_tag, 1 | 3) || cb_size != 0 {
        return;
    }
    if bytes[body + EXTENDED_FMT_LEN..body + size]
        .iter()
        .any(|byte| *byte != 0)
    {
        return;
    }
    bytes[chunk + 4..chunk + 8].copy_from_slice(&(EXTENDED_FMT_LEN as u32).to_le_bytes());
    bytes.drain(body + EXTENDED_FMT_LEN..body + size);
    let riff_size = (bytes.len() - CHUNK_HEADER_LEN) as u32;
    bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let raw = bytes.get(at..at + 2)?;
    Some(u16::from_le_bytes([raw[0], raw[1]]))
}

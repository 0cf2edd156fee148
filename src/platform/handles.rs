//! Handle-type code decoding.
//!
//! Attribute values are arrays of `cl_uint` codes. Decoding reinterprets
//! the buffer in native byte order; labels are for diagnostics only and any
//! code, known or not, is accepted.

use crate::error::{PreflightError, Result};

/// Width in bytes of one handle-type code.
pub const HANDLE_TYPE_WIDTH: usize = std::mem::size_of::<u32>();

/// Known external memory and semaphore handle types.
const KNOWN_HANDLE_TYPES: &[(u32, &str)] = &[
    (0x2055, "SEMAPHORE_HANDLE_OPAQUE_FD"),
    (0x2056, "SEMAPHORE_HANDLE_OPAQUE_WIN32"),
    (0x2057, "SEMAPHORE_HANDLE_OPAQUE_WIN32_KMT"),
    (0x2058, "SEMAPHORE_HANDLE_SYNC_FD"),
    (0x2059, "SEMAPHORE_HANDLE_D3D12_FENCE"),
    (0x2060, "EXTERNAL_MEMORY_HANDLE_OPAQUE_FD"),
    (0x2061, "EXTERNAL_MEMORY_HANDLE_OPAQUE_WIN32"),
    (0x2062, "EXTERNAL_MEMORY_HANDLE_OPAQUE_WIN32_KMT"),
    (0x2063, "EXTERNAL_MEMORY_HANDLE_D3D11_TEXTURE"),
    (0x2064, "EXTERNAL_MEMORY_HANDLE_D3D11_TEXTURE_KMT"),
    (0x2065, "EXTERNAL_MEMORY_HANDLE_D3D12_HEAP"),
    (0x2066, "EXTERNAL_MEMORY_HANDLE_D3D12_RESOURCE"),
    (0x2067, "EXTERNAL_MEMORY_HANDLE_DMA_BUF"),
];

/// Decode a raw attribute buffer into handle-type codes.
///
/// `name` is the attribute's display label, used in the error when the
/// buffer is not a whole number of codes.
pub fn decode_handle_types(name: &'static str, bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.len() % HANDLE_TYPE_WIDTH != 0 {
        return Err(PreflightError::MisalignedInfo {
            name,
            byte_size: bytes.len(),
            width: HANDLE_TYPE_WIDTH,
        });
    }

    Ok(bytes
        .chunks_exact(HANDLE_TYPE_WIDTH)
        .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Encode codes the way a driver lays them out in memory.
pub fn encode_handle_types(codes: &[u32]) -> Vec<u8> {
    codes.iter().flat_map(|c| c.to_ne_bytes()).collect()
}

/// Display name for a known handle-type code.
pub fn handle_type_name(code: u32) -> Option<&'static str> {
    KNOWN_HANDLE_TYPES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

/// Render a code as hex, with its name when known.
pub fn describe_handle_type(code: u32) -> String {
    match handle_type_name(code) {
        Some(name) => format!("{:x} ({})", code, name),
        None => format!("{:x}", code),
    }
}

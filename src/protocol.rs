//! Wire constants for the ferry transfer protocol
//!
//! All multi-byte integers on the wire are little-endian with the fixed
//! widths below. Bumping any width or field layout bumps VERSION.

pub const VERSION: u16 = 1;

/// Port used when the client address carries none.
pub const DEFAULT_PORT: u16 = 2231;

/// Unit of file bytes moved per I/O call.
pub const CHUNK_SIZE: usize = 1024;

// Caps for length-prefixed text fields. A reader must reject a prefix
// above the cap before allocating.
pub const MAX_NAME_LEN: usize = 256;
pub const MAX_CATALOG_LEN: usize = 4096;
pub const MAX_NOTICE_LEN: usize = 512;

/// Operation selector sent by the client as a u32, first bytes on the wire.
pub mod opt {
    pub const DOWNLOAD: u32 = 1;
    pub const UPLOAD: u32 = 2;
}

/// Status byte preceding either a payload or a textual notice.
pub mod status {
    pub const OK: u8 = 0;
    pub const ERR: u8 = 1;
}

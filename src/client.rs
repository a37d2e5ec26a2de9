//! Client half of the session protocol: one connection, one operation
//!
//! The functions here are the programmatic surface; the ferry binary wraps
//! them with interactive prompts. Each mirrors one leg of the server flow in
//! `session`.

use std::net::TcpStream;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::protocol::{opt, status, DEFAULT_PORT, MAX_CATALOG_LEN, MAX_NAME_LEN};
use crate::transfer;
use crate::wire;

pub(crate) fn resolve_addr(server: &str) -> String {
    if server.contains(':') {
        server.to_string()
    } else {
        format!("{server}:{DEFAULT_PORT}")
    }
}

/// Opens the single connection for this process invocation.
pub fn connect(server: &str) -> Result<TcpStream> {
    let addr = resolve_addr(server);
    let stream = TcpStream::connect(&addr)
        .map_err(|e| Error::Connection(format!("connect {addr}: {e}")))?;
    let _ = stream.set_nodelay(true);
    Ok(stream)
}

/// Sends the download option and returns the server's catalog text.
pub fn fetch_catalog(stream: &mut TcpStream) -> Result<String> {
    wire::write_u32(stream, opt::DOWNLOAD)?;
    wire::read_text(stream, MAX_CATALOG_LEN)
}

#[derive(Debug)]
pub struct Downloaded {
    pub name: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Picks entry `index` from the catalog already fetched on this connection
/// and streams it into `dest_dir`. The server-resolved name passes the same
/// sanitizer the server applies to uploads before it becomes a local path.
pub fn download(
    stream: &mut TcpStream,
    index: u32,
    dest_dir: &Path,
    progress: &mut dyn Progress,
) -> Result<Downloaded> {
    wire::write_u32(stream, index)?;
    if wire::read_status(stream)? != status::OK {
        return Err(Error::InvalidIndex(wire::read_notice(stream)?));
    }
    let name = wire::read_text(stream, MAX_NAME_LEN)?;
    catalog::sanitize_name(&name)?;

    if wire::read_status(stream)? != status::OK {
        return Err(Error::FileAccess(wire::read_notice(stream)?));
    }
    let size = wire::read_u64(stream)?;

    std::fs::create_dir_all(dest_dir)
        .map_err(|e| Error::FileAccess(format!("{}: {e}", dest_dir.display())))?;
    let path = dest_dir.join(&name);
    let bytes = transfer::receive_file(stream, &path, size, progress)?;
    Ok(Downloaded { name, path, bytes })
}

/// Pushes `source` to the server under its bare filename. Opens the file
/// before any protocol bytes go out, and waits for the server's ack before
/// streaming so a rejected name or uncreatable destination stops cleanly.
pub fn upload(stream: &mut TcpStream, source: &Path, progress: &mut dyn Progress) -> Result<u64> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::FileAccess(format!("{}: no usable filename", source.display())))?;
    catalog::sanitize_name(name)?;
    if !source.is_file() {
        return Err(Error::FileAccess(format!(
            "{}: not a regular file",
            source.display()
        )));
    }

    wire::write_u32(stream, opt::UPLOAD)?;
    wire::write_text(stream, name, MAX_NAME_LEN)?;
    if wire::read_status(stream)? != status::OK {
        return Err(Error::FileAccess(wire::read_notice(stream)?));
    }
    transfer::send_framed(stream, source, progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_default_port() {
        assert_eq!(resolve_addr("192.168.1.10"), "192.168.1.10:2231");
        assert_eq!(resolve_addr("192.168.1.10:9000"), "192.168.1.10:9000");
    }
}

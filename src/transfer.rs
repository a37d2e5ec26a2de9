//! Single-pass file streaming in both protocol directions
//!
//! Download direction announces the byte count up front and streams raw
//! chunks; the receiver stops at the announced size. Upload direction cannot
//! pre-announce, so each chunk carries a u32 length prefix and a zero-length
//! chunk marks the end. A partial destination file is retained on abort.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::protocol::{status, CHUNK_SIZE};
use crate::wire;

fn pct(done: u64, total: u64) -> u8 {
    if total == 0 {
        100
    } else {
        (done.saturating_mul(100) / total) as u8
    }
}

/// Sender half of the size-announced direction. Emits an error notice in
/// place of the size field when the source cannot be read; no retries.
pub fn send_file<W: Write>(conn: &mut W, path: &Path, progress: &mut dyn Progress) -> Result<u64> {
    let size = match std::fs::metadata(path) {
        Ok(md) if md.is_file() => md.len(),
        Ok(_) => {
            let _ = wire::send_notice(conn, "not a regular file");
            return Err(Error::FileAccess(format!(
                "{}: not a regular file",
                path.display()
            )));
        }
        Err(e) => {
            let _ = wire::send_notice(conn, "file unavailable");
            return Err(Error::FileAccess(format!("{}: {e}", path.display())));
        }
    };
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            let _ = wire::send_notice(conn, "file unavailable");
            return Err(Error::FileAccess(format!("{}: {e}", path.display())));
        }
    };

    wire::write_status(conn, status::OK)?;
    wire::write_u64(conn, size)?;

    let mut buf = [0u8; CHUNK_SIZE];
    let mut sent = 0u64;
    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| Error::FileAccess(format!("{}: {e}", path.display())))?;
        if n == 0 {
            break;
        }
        conn.write_all(&buf[..n])
            .map_err(|e| Error::Aborted(format!("peer write failed after {sent} bytes: {e}")))?;
        sent += n as u64;
        progress.percent(pct(sent, size));
    }
    if size == 0 {
        progress.percent(100);
    }
    progress.finish();
    Ok(sent)
}

/// Receiver half of the size-announced direction. `expected` comes from the
/// size field the sender already wrote; the caller has consumed status and
/// size before calling. A stream that closes early leaves the short partial
/// file in place and reports the abort.
pub fn receive_file<R: Read>(
    conn: &mut R,
    path: &Path,
    expected: u64,
    progress: &mut dyn Progress,
) -> Result<u64> {
    let mut file =
        File::create(path).map_err(|e| Error::FileAccess(format!("{}: {e}", path.display())))?;
    if expected == 0 {
        progress.percent(100);
        progress.finish();
        return Ok(0);
    }

    let mut buf = [0u8; CHUNK_SIZE];
    let mut got = 0u64;
    while got < expected {
        let want = ((expected - got) as usize).min(buf.len());
        let n = wire::read_chunk(conn, &mut buf[..want])?;
        if n == 0 {
            return Err(Error::Aborted(format!(
                "stream closed after {got} of {expected} bytes"
            )));
        }
        file.write_all(&buf[..n])
            .map_err(|e| Error::FileAccess(format!("{}: {e}", path.display())))?;
        got += n as u64;
        progress.percent(pct(got, expected));
    }
    progress.finish();
    Ok(got)
}

/// Sender half of the framed (upload) direction. Chunks carry a u32 length
/// prefix; a zero-length chunk terminates, so content is never inspected for
/// an end marker. Progress percent comes from the local stat size.
pub fn send_framed<W: Write>(
    conn: &mut W,
    path: &Path,
    progress: &mut dyn Progress,
) -> Result<u64> {
    let size = std::fs::metadata(path)
        .map_err(|e| Error::FileAccess(format!("{}: {e}", path.display())))?
        .len();
    let mut file =
        File::open(path).map_err(|e| Error::FileAccess(format!("{}: {e}", path.display())))?;

    let mut buf = [0u8; CHUNK_SIZE];
    let mut sent = 0u64;
    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| Error::FileAccess(format!("{}: {e}", path.display())))?;
        if n == 0 {
            break;
        }
        wire::write_u32(conn, n as u32)?;
        conn.write_all(&buf[..n])
            .map_err(|e| Error::Aborted(format!("peer write failed after {sent} bytes: {e}")))?;
        sent += n as u64;
        progress.percent(pct(sent, size));
    }
    wire::write_u32(conn, 0)?;
    if size == 0 {
        progress.percent(100);
    }
    progress.finish();
    Ok(sent)
}

/// Receiver half of the framed direction. Creates the destination first and
/// acknowledges with a status byte so the peer does not stream into a dead
/// session; a creation failure sends the notice without consuming any body
/// bytes.
pub fn receive_framed<C: Read + Write>(
    conn: &mut C,
    path: &Path,
    progress: &mut dyn Progress,
) -> Result<u64> {
    let mut file = match File::create(path) {
        Ok(f) => f,
        Err(e) => {
            let _ = wire::send_notice(conn, "cannot create file");
            return Err(Error::FileAccess(format!("{}: {e}", path.display())));
        }
    };
    wire::write_status(conn, status::OK)?;

    let mut buf = [0u8; CHUNK_SIZE];
    let mut got = 0u64;
    loop {
        let len = wire::read_u32(conn)? as usize;
        if len == 0 {
            break;
        }
        if len > CHUNK_SIZE {
            return Err(Error::Framing(format!(
                "chunk claims {len} bytes, max is {CHUNK_SIZE}"
            )));
        }
        conn.read_exact(&mut buf[..len])
            .map_err(|e| Error::Aborted(format!("stream closed after {got} bytes: {e}")))?;
        file.write_all(&buf[..len])
            .map_err(|e| Error::FileAccess(format!("{}: {e}", path.display())))?;
        got += len as u64;
        progress.bytes(got);
    }
    progress.finish();
    Ok(got)
}

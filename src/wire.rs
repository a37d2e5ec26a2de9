//! Byte-stream framing: fixed-width integers, length-prefixed text, raw chunks
//!
//! Generic over `Read`/`Write` so the transfer engine and the tests share one
//! implementation. Short reads and bad prefixes surface as `Error::Framing`.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::protocol::{status, MAX_NOTICE_LEN};

pub fn read_u32<R: Read>(r: &mut R) -> Result<u32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)
        .map_err(|e| Error::Framing(format!("short read on u32 field: {e}")))?;
    Ok(u32::from_le_bytes(b))
}

pub fn write_u32<W: Write>(w: &mut W, v: u32) -> Result<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub fn read_u64<R: Read>(r: &mut R) -> Result<u64> {
    let mut b = [0u8; 8];
    r.read_exact(&mut b)
        .map_err(|e| Error::Framing(format!("short read on u64 field: {e}")))?;
    Ok(u64::from_le_bytes(b))
}

pub fn write_u64<W: Write>(w: &mut W, v: u64) -> Result<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// One read call into `buf`. Returns 0 on graceful close; a failed read is
/// `Error::Aborted` because it can only happen mid-stream.
pub fn read_chunk<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<usize> {
    r.read(buf)
        .map_err(|e| Error::Aborted(format!("read failed mid-stream: {e}")))
}

/// u16 length prefix + UTF-8 bytes, length checked against `cap` on both
/// sides. Nothing past the prefixed length is ever interpreted.
pub fn write_text<W: Write>(w: &mut W, s: &str, cap: usize) -> Result<()> {
    let b = s.as_bytes();
    if b.len() > cap {
        return Err(Error::Framing(format!(
            "text field is {} bytes, cap is {}",
            b.len(),
            cap
        )));
    }
    w.write_all(&(b.len() as u16).to_le_bytes())?;
    w.write_all(b)?;
    Ok(())
}

pub fn read_text<R: Read>(r: &mut R, cap: usize) -> Result<String> {
    let mut lb = [0u8; 2];
    r.read_exact(&mut lb)
        .map_err(|e| Error::Framing(format!("short read on text length: {e}")))?;
    let len = u16::from_le_bytes(lb) as usize;
    if len > cap {
        return Err(Error::Framing(format!(
            "text field claims {len} bytes, cap is {cap}"
        )));
    }
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)
        .map_err(|e| Error::Framing(format!("short read on text body: {e}")))?;
    String::from_utf8(buf).map_err(|_| Error::Framing("text field is not UTF-8".into()))
}

pub fn write_status<W: Write>(w: &mut W, s: u8) -> Result<()> {
    w.write_all(&[s])?;
    Ok(())
}

pub fn read_status<R: Read>(r: &mut R) -> Result<u8> {
    let mut b = [0u8; 1];
    r.read_exact(&mut b)
        .map_err(|e| Error::Framing(format!("short read on status byte: {e}")))?;
    Ok(b[0])
}

/// Error-status byte followed by a bounded textual notice.
pub fn send_notice<W: Write>(w: &mut W, msg: &str) -> Result<()> {
    write_status(w, status::ERR)?;
    write_text(w, msg, MAX_NOTICE_LEN)
}

/// Reads the notice that follows an error status.
pub fn read_notice<R: Read>(r: &mut R) -> Result<String> {
    read_text(r, MAX_NOTICE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn integer_round_trip() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 7).unwrap();
        write_u64(&mut buf, u64::MAX - 1).unwrap();
        let mut cur = Cursor::new(buf);
        assert_eq!(read_u32(&mut cur).unwrap(), 7);
        assert_eq!(read_u64(&mut cur).unwrap(), u64::MAX - 1);
    }

    #[test]
    fn short_read_is_framing_error() {
        let mut cur = Cursor::new(vec![1u8, 2, 3]);
        match read_u32(&mut cur) {
            Err(Error::Framing(_)) => {}
            other => panic!("expected framing error, got {other:?}"),
        }
    }

    #[test]
    fn text_round_trip() {
        let mut buf = Vec::new();
        write_text(&mut buf, "beta.txt", 256).unwrap();
        let mut cur = Cursor::new(buf);
        assert_eq!(read_text(&mut cur, 256).unwrap(), "beta.txt");
    }

    #[test]
    fn text_cap_enforced_on_write() {
        let mut buf = Vec::new();
        let long = "x".repeat(300);
        assert!(matches!(
            write_text(&mut buf, &long, 256),
            Err(Error::Framing(_))
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn text_cap_enforced_on_read() {
        // A length prefix above the cap must be rejected before the body.
        let mut buf = Vec::new();
        buf.extend_from_slice(&300u16.to_le_bytes());
        buf.extend_from_slice(&[b'x'; 300]);
        let mut cur = Cursor::new(buf);
        assert!(matches!(read_text(&mut cur, 256), Err(Error::Framing(_))));
    }

    #[test]
    fn non_utf8_text_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&2u16.to_le_bytes());
        buf.extend_from_slice(&[0xff, 0xfe]);
        let mut cur = Cursor::new(buf);
        assert!(matches!(read_text(&mut cur, 256), Err(Error::Framing(_))));
    }

    #[test]
    fn notice_round_trip() {
        let mut buf = Vec::new();
        send_notice(&mut buf, "invalid file index").unwrap();
        let mut cur = Cursor::new(buf);
        assert_eq!(read_status(&mut cur).unwrap(), status::ERR);
        assert_eq!(read_notice(&mut cur).unwrap(), "invalid file index");
    }

    #[test]
    fn chunk_read_reports_graceful_close() {
        let mut cur = Cursor::new(Vec::<u8>::new());
        let mut buf = [0u8; 16];
        assert_eq!(read_chunk(&mut cur, &mut buf).unwrap(), 0);
    }
}

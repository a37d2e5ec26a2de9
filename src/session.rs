//! Server half of the session protocol
//!
//! One connection carries exactly one operation. The flow below walks the
//! states in order: await option, then either catalog/index/stream-out or
//! filename/stream-in, then close. Every exit path leaves one record in the
//! session log.

use std::net::TcpStream;
use std::path::Path;

use crate::catalog;
use crate::error::Result;
use crate::logger::{SessionLog, SessionRecord};
use crate::progress::NoProgress;
use crate::protocol::{opt, status, MAX_CATALOG_LEN, MAX_NAME_LEN};
use crate::transfer;
use crate::wire;

/// Runs one session to completion and appends its record to the log.
/// Errors are consumed here; they never reach the accept loop.
pub fn handle_session(
    stream: &mut TcpStream,
    peer: &str,
    share_dir: &Path,
    upload_dir: &Path,
    log: &dyn SessionLog,
) {
    let mut record = SessionRecord::begin(peer);
    if let Err(e) = run(stream, share_dir, upload_dir, &mut record) {
        eprintln!("session {peer}: {e}");
        if !record.has_outcome() {
            record.set_outcome(None, &format!("Failed ({e})"));
        }
    }
    log.record(&record.finish());
}

fn run(
    stream: &mut TcpStream,
    share_dir: &Path,
    upload_dir: &Path,
    record: &mut SessionRecord,
) -> Result<()> {
    match wire::read_u32(stream)? {
        opt::DOWNLOAD => download(stream, share_dir, record),
        opt::UPLOAD => upload(stream, upload_dir, record),
        other => {
            wire::send_notice(stream, &format!("unknown option {other}"))?;
            record.set_outcome(None, "Unknown option");
            Ok(())
        }
    }
}

fn download(stream: &mut TcpStream, share_dir: &Path, record: &mut SessionRecord) -> Result<()> {
    let names = catalog::list_directory(share_dir);
    let (text, count) = catalog::render(&names);
    wire::write_text(stream, &text, MAX_CATALOG_LEN)?;

    let index = wire::read_u32(stream)?;
    if index == 0 || index as usize > count {
        wire::send_notice(
            stream,
            &format!("invalid file index {index}: catalog has {count} entries"),
        )?;
        record.set_outcome(None, "Invalid file index");
        return Ok(());
    }
    let name = &names[(index - 1) as usize];

    wire::write_status(stream, status::OK)?;
    wire::write_text(stream, name, MAX_NAME_LEN)?;
    match transfer::send_file(stream, &share_dir.join(name), &mut NoProgress) {
        Ok(bytes) => {
            eprintln!("sent {name} ({bytes} bytes)");
            record.set_outcome(Some(name.as_str()), "Download completed");
            Ok(())
        }
        Err(e) => {
            record.set_outcome(Some(name.as_str()), "Download failed");
            Err(e)
        }
    }
}

fn upload(stream: &mut TcpStream, upload_dir: &Path, record: &mut SessionRecord) -> Result<()> {
    let raw = wire::read_text(stream, MAX_NAME_LEN)?;
    let name = match catalog::sanitize_name(&raw) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("upload rejected: {e}");
            wire::send_notice(stream, "unsafe filename rejected")?;
            record.set_outcome(Some(raw.as_str()), "Rejected filename");
            return Ok(());
        }
    };

    match transfer::receive_framed(stream, &upload_dir.join(name), &mut NoProgress) {
        Ok(bytes) => {
            eprintln!("received {name} ({bytes} bytes)");
            record.set_outcome(Some(name), "Upload completed");
            Ok(())
        }
        Err(e) => {
            record.set_outcome(Some(name), "Upload failed");
            Err(e)
        }
    }
}

//! Accept loop: one thread per connection, nothing shared but the log sink

use anyhow::{Context, Result};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

use crate::cli::DaemonOpts;
use crate::logger::SessionLog;
use crate::session;

/// Binds once and accepts forever. A bind failure is fatal; accept and
/// session failures are printed and the loop keeps going.
pub fn serve(opts: &DaemonOpts, log: Arc<dyn SessionLog>) -> Result<()> {
    let listener =
        TcpListener::bind(&opts.bind).with_context(|| format!("bind {}", opts.bind))?;
    eprintln!(
        "ferryd listening on {} share={} uploads={}",
        opts.bind,
        opts.share_dir.display(),
        opts.upload_dir.display()
    );
    for conn in listener.incoming() {
        match conn {
            Ok(stream) => {
                let _ = stream.set_nodelay(true);
                let peer = stream
                    .peer_addr()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|_| "unknown".to_string());
                eprintln!("client connected from {}", peer);
                let share_dir = opts.share_dir.clone();
                let upload_dir = opts.upload_dir.clone();
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    let mut stream = stream;
                    session::handle_session(&mut stream, &peer, &share_dir, &upload_dir, &*log);
                });
            }
            Err(e) => {
                eprintln!("accept error: {}", e);
            }
        }
    }
    Ok(())
}

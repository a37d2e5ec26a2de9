//! Shared CLI option structs for the ferry and ferryd binaries

use clap::Parser;
use std::path::PathBuf;

/// Daemon options: where to listen, what to serve, where uploads land.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about = "ferryd - multi-client file-drop daemon")]
pub struct DaemonOpts {
    /// Bind address (host:port)
    #[arg(long, default_value = "0.0.0.0:2231")]
    pub bind: String,

    /// Directory of files offered for download
    #[arg(long, default_value = "shared")]
    pub share_dir: PathBuf,

    /// Directory where client uploads land
    #[arg(long, default_value = "client_uploads")]
    pub upload_dir: PathBuf,

    /// Append one record per session to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Client options: the server to talk to and the two local directories.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about = "ferry - download from or upload to a ferryd server")]
pub struct ClientOpts {
    /// Server address (host or host:port)
    pub server: String,

    /// Where downloaded files are written
    #[arg(long, default_value = "downloads")]
    pub downloads: PathBuf,

    /// Local directory offered for upload
    #[arg(long, default_value = "uploads")]
    pub uploads: PathBuf,
}

use clap::Parser;
use std::path::PathBuf;

/// SSH config generator driven by NetBox inventory.
#[derive(Debug, Parser)]
#[command(name = "nbssh", version, about = "SSH config generator")]
pub struct Args {
    /// Username written into every host block.
    #[arg(short, long)]
    pub username: String,

    /// Path of the SSH config file to (over)write.
    #[arg(short, long, value_parser = parse_output_path)]
    pub path: PathBuf,
}

/// Accept a path that exists, or whose parent directory exists.
/// Writability is not checked here; a write failure surfaces later.
fn parse_output_path(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.exists() {
        return Ok(path);
    }
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() || parent.exists() => Ok(path),
        _ => Err(format!("directory of '{raw}' does not exist")),
    }
}

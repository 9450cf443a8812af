//! World snapshots in `MessagePack`.
//!
//! A snapshot holds every entity with its attributes, guards and event
//! handlers, plus the identifier counter, so identifiers stay unique across
//! restarts.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use parley_foundation::{Error, ErrorKind, Result};
use parley_storage::World;
use tracing::info;

/// Serializes a world to `MessagePack` bytes, keeping field names.
///
/// # Errors
///
/// Returns a serialization error if encoding fails.
pub fn to_bytes(world: &World) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(world).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a world from `MessagePack` bytes.
///
/// # Errors
///
/// Returns a serialization error if the bytes are not a world.
pub fn from_bytes(bytes: &[u8]) -> Result<World> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::Io(format!(
        "failed to {action} '{}': {e}",
        path.display()
    )))
}

/// Saves a world to a file, replacing any previous contents.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written, or a serialization
/// error.
pub fn save_to_file<P: AsRef<Path>>(world: &World, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(world)?;
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;
    info!(path = %path.display(), entities = world.len(), "saved world snapshot");
    Ok(())
}

/// Loads a world from a snapshot file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a serialization
/// error.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<World> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;
    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;
    let world = from_bytes(&bytes)?;
    info!(path = %path.display(), entities = world.len(), "loaded world snapshot");
    Ok(world)
}

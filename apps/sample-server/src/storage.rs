//! Store for signed documents awaiting download. Artifacts are written
//! under a generated name so a download link can be handed to the browser
//! right after the signature completes.

use std::path::{Path, PathBuf};

use uuid::Uuid;

pub async fn store(dir: &Path, extension: &str, content: &[u8]) -> std::io::Result<String> {
    let filename = format!("{}.{extension}", Uuid::new_v4());
    tokio::fs::write(dir.join(&filename), content).await?;
    Ok(filename)
}

/// Maps a requested filename back to a path inside the store. Names not
/// produced by [`store`] (separators, parent references) resolve to `None`.
pub fn resolve(dir: &Path, filename: &str) -> Option<PathBuf> {
    if filename.contains(['/', '\\']) || filename.contains("..") {
        return None;
    }

    Some(dir.join(filename))
}

pub fn content_type(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, extension)| extension) {
        Some("pdf") => "application/pdf",
        Some("p7s") => "application/pkcs7-signature",
        Some("xml") => "application/xml",
        _ => "application/octet-stream",
    }
}

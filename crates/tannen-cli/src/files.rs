//! Turning paths into intake candidates.

use anyhow::{Context, Result};
use std::path::Path;
use tannen_intake::FileCandidate;

/// Read a path into a candidate. The declared media type is derived from
/// the extension, the same signal a browser puts into `File.type`.
pub fn read_candidate(path: &Path) -> Result<FileCandidate> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo")
        .to_string();

    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(FileCandidate::new(file_name, content_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_comes_from_the_extension() {
        let dir = tempfile::tempdir().unwrap();

        let jpg = dir.path().join("star.jpg");
        std::fs::write(&jpg, b"not really a jpeg").unwrap();
        let candidate = read_candidate(&jpg).unwrap();
        assert_eq!(candidate.content_type, "image/jpeg");
        assert_eq!(candidate.file_name, "star.jpg");

        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, b"plain text").unwrap();
        let candidate = read_candidate(&txt).unwrap();
        assert_eq!(candidate.content_type, "text/plain");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_candidate(Path::new("/nonexistent/photo.jpg")).is_err());
    }
}

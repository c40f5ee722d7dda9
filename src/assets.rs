//! Startup resources
//!
//! The score font is loaded once before the frame loop starts. A missing or
//! malformed font is the one fatal error in the program.

use std::path::{Path, PathBuf};

/// Process exit status when a startup resource cannot be loaded
pub const EXIT_RESOURCE_LOAD_FAILURE: i32 = 2;

/// sfnt version tags accepted as font files
const FONT_MAGICS: [[u8; 4]; 4] = [
    [0x00, 0x01, 0x00, 0x00], // TrueType
    *b"OTTO",                 // OpenType (CFF)
    *b"true",                 // Apple TrueType
    *b"ttcf",                 // Collection
];

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {path}: HTTP {status}")]
    Http { path: PathBuf, status: u16 },
    #[error("{path} is not a TrueType/OpenType font")]
    NotAFont { path: PathBuf },
}

/// Raw font bytes, validated by header.
///
/// Glyphs are never rasterized here; score text is drawn by the host (the
/// DOM HUD in the browser).
#[derive(Debug, Clone)]
pub struct FontResource {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

impl FontResource {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref().to_path_buf();
        let data = std::fs::read(&path).map_err(|source| ResourceError::Unreadable {
            path: path.clone(),
            source,
        })?;
        Self::from_bytes(path, data)
    }

    /// Body of an HTTP fetch. Non-2xx responses fail before the header check.
    pub fn from_http(path: &str, status: u16, data: Vec<u8>) -> Result<Self, ResourceError> {
        let path = PathBuf::from(path);
        if !(200..300).contains(&status) {
            return Err(ResourceError::Http { path, status });
        }
        Self::from_bytes(path, data)
    }

    pub fn from_bytes(path: PathBuf, data: Vec<u8>) -> Result<Self, ResourceError> {
        let is_font = data
            .get(..4)
            .is_some_and(|magic| FONT_MAGICS.iter().any(|m| m == magic));
        if !is_font {
            return Err(ResourceError::NotAFont { path });
        }
        log::info!("Loaded font {} ({} bytes)", path.display(), data.len());
        Ok(Self { path, data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "turret-arena-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_font() {
        let err = FontResource::load("/definitely/not/here/Arial.ttf").unwrap_err();
        assert!(matches!(err, ResourceError::Unreadable { .. }));
    }

    #[test]
    fn test_truetype_header_accepted() {
        let path = temp_file("ok.ttf", &[0, 1, 0, 0, 0, 12, 0, 128]);
        let font = FontResource::load(&path).unwrap();
        assert_eq!(font.len(), 8);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_opentype_header_accepted() {
        let font = FontResource::from_bytes("a.otf".into(), b"OTTOrest".to_vec()).unwrap();
        assert!(!font.is_empty());
    }

    #[test]
    fn test_garbage_rejected() {
        let path = temp_file("bad.ttf", b"<html>not a font</html>");
        let err = FontResource::load(&path).unwrap_err();
        assert!(matches!(err, ResourceError::NotAFont { .. }));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_fetch_not_found_rejected() {
        let err = FontResource::from_http("Arial.ttf", 404, b"Not Found".to_vec()).unwrap_err();
        assert!(matches!(err, ResourceError::Http { status: 404, .. }));
    }

    #[test]
    fn test_fetch_fallback_page_rejected() {
        // Dev servers often answer unknown paths with index.html and a 200
        let err = FontResource::from_http("Arial.ttf", 200, b"<!DOCTYPE html>".to_vec())
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotAFont { .. }));
    }

    #[test]
    fn test_fetch_font_accepted() {
        let font = FontResource::from_http("fonts/a.ttf", 200, vec![0, 1, 0, 0, 9]).unwrap();
        assert_eq!(font.path, PathBuf::from("fonts/a.ttf"));
        assert_eq!(font.len(), 5);
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = FontResource::from_bytes("empty.ttf".into(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("empty.ttf"));
    }
}

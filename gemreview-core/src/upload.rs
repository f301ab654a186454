//! Uploaded source files
//!
//! Uploads are limited to the extensions of the offered languages and must be
//! valid UTF-8. Invalid bytes are rejected rather than replaced, so the model
//! never reviews text that differs from the file.

use std::path::Path;

use tracing::debug;

use crate::review::Language;
use crate::{Error, Result};

/// A file handed over by the front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as given by the user, used for the extension check
    pub name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload from a name and its contents
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read an upload from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Upload(format!("{} is not a file", path.display())))?;
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// Extension of the file name, without the dot
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name).extension().and_then(|e| e.to_str())
    }

    /// Language matching the file extension
    pub fn language(&self) -> Option<Language> {
        self.extension().and_then(Language::from_extension)
    }

    /// Check the extension and decode the contents as UTF-8
    pub fn decode(&self) -> Result<String> {
        if self.language().is_none() {
            let allowed = Language::ALL
                .iter()
                .map(|l| l.extension())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::Upload(format!(
                "{} has an unsupported file type (allowed: {})",
                self.name, allowed
            )));
        }

        let text = std::str::from_utf8(&self.bytes).map_err(|source| Error::Decode {
            file: self.name.clone(),
            source,
        })?;

        debug!(file = %self.name, bytes = self.bytes.len(), "Decoded upload");
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decode_python_file() {
        let upload = UploadedFile::new("sample.py", "print(1)");
        assert_eq!(upload.extension(), Some("py"));
        assert_eq!(upload.language(), Some(Language::Python));
        assert_eq!(upload.decode().unwrap(), "print(1)");
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        let upload = UploadedFile::new("Main.KT", "fun main() {}");
        assert_eq!(upload.language(), Some(Language::Kotlin));
        assert!(upload.decode().is_ok());
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        for name in ["notes.txt", "Makefile", "lib.rs", "archive.py.gz"] {
            let err = UploadedFile::new(name, "x").decode().unwrap_err();
            assert!(matches!(err, Error::Upload(_)), "{name}");
            assert!(err.to_string().contains("unsupported file type"));
        }
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let upload = UploadedFile::new("latin1.py", vec![b'#', b' ', 0xe9, b'\n']);
        let err = upload.decode().unwrap_err();
        assert!(matches!(err, Error::Decode { ref file, .. } if file == "latin1.py"));
        assert!(err.to_string().starts_with("Could not decode latin1.py as UTF-8"));
    }

    #[test]
    fn test_bom_stripped() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"console.log(1)");
        let upload = UploadedFile::new("app.js", bytes);
        assert_eq!(upload.decode().unwrap(), "console.log(1)");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.py");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "print(1)").unwrap();

        let upload = UploadedFile::from_path(&path).unwrap();
        assert_eq!(upload.name, "sample.py");
        assert_eq!(upload.decode().unwrap(), "print(1)");
    }

    #[test]
    fn test_from_missing_path() {
        let result = UploadedFile::from_path("/nonexistent/path/12345/sample.py");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}

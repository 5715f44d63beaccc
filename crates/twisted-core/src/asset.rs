use crate::cloud::InlineData;
use crate::error::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_MIME: &str = "image/png";

/// The single image held by the panel until it is replaced or dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    /// Base64 payload exactly as returned by the endpoint
    pub data: String,
    pub mime_type: String,
}

impl GeneratedAsset {
    pub fn new(data: impl Into<String>, mime_type: Option<&str>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MIME)
                .to_string(),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(BASE64.decode(self.data.as_bytes())?)
    }

    pub fn extension(&self) -> &str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }

    /// Writes the decoded image to `dir/asset-<n>.<ext>`, picking the first
    /// free `n`.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let bytes = self.decode()?;
        fs::create_dir_all(dir)?;
        let mut n = 1u32;
        let path = loop {
            let candidate = dir.join(format!("asset-{}.{}", n, self.extension()));
            if !candidate.exists() {
                break candidate;
            }
            n += 1;
        };
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

impl From<&InlineData> for GeneratedAsset {
    fn from(inline: &InlineData) -> Self {
        Self::new(inline.data.clone(), inline.mime_type.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerativeError;
    use base64::Engine as _;

    #[test]
    fn data_uri_defaults_to_png() {
        let asset = GeneratedAsset::new("AAAA", None);
        assert_eq!(asset.data_uri(), "data:image/png;base64,AAAA");
        assert_eq!(asset.extension(), "png");
    }

    #[test]
    fn keeps_reported_mime_type() {
        let asset = GeneratedAsset::from(&InlineData {
            mime_type: Some("image/jpeg".to_string()),
            data: "AAAA".to_string(),
        });
        assert_eq!(asset.mime_type, "image/jpeg");
        assert_eq!(asset.extension(), "jpg");
    }

    #[test]
    fn decode_rejects_garbage() {
        let asset = GeneratedAsset::new("not base64!", None);
        assert!(matches!(asset.decode(), Err(GenerativeError::Asset(_))));
    }

    #[test]
    fn save_picks_a_free_name() {
        let dir = std::env::temp_dir().join(format!("twisted-asset-test-{}", std::process::id()));
        let asset = GeneratedAsset::new(BASE64.encode(b"\x89PNG fake"), None);

        let first = asset.save_to(&dir).unwrap();
        let second = asset.save_to(&dir).unwrap();
        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"\x89PNG fake");

        fs::remove_dir_all(&dir).unwrap();
    }
}

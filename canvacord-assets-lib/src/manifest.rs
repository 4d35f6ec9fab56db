use crate::error::InstallError;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Component, Path};

/// Category of a downloadable asset; decides the subdirectory it lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Font,
}

impl AssetKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Font => "fonts",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Image => write!(f, "image"),
            AssetKind::Font => write!(f, "font"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AssetEntry {
    /// File name inside the category directory
    pub name: String,
    pub url: String,
}

/// The images and fonts listed by the remote manifest, in download order.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    #[serde(default)]
    pub images: Vec<AssetEntry>,
    #[serde(default)]
    pub fonts: Vec<AssetEntry>,
}

/// Matches the JSON document served by the manifest endpoint
#[derive(Debug, Deserialize)]
struct ManifestJson {
    data: Manifest,
}

impl Manifest {
    /// Interprets a fetched (or previously persisted) manifest document.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Err(InstallError::InvalidManifest("document is empty".to_string()).into());
        }

        let json: ManifestJson = serde_json::from_value(value.clone())
            .map_err(|e| InstallError::InvalidManifest(e.to_string()))?;

        json.data.validate()?;
        Ok(json.data)
    }

    /// Loads a manifest that was persisted by a previous run.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read manifest file: {:?}", path))?;
        let value: Value = serde_json::from_str(&content)
            .context(format!("Manifest file is not valid JSON: {:?}", path))?;
        Self::from_json_value(&value)
    }

    /// All entries paired with their kind: images first, then fonts.
    pub fn entries(&self) -> impl Iterator<Item = (AssetKind, &AssetEntry)> {
        self.images
            .iter()
            .map(|entry| (AssetKind::Image, entry))
            .chain(self.fonts.iter().map(|entry| (AssetKind::Font, entry)))
    }

    pub fn len(&self) -> usize {
        self.images.len() + self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> Result<()> {
        for entries in [&self.images, &self.fonts] {
            let mut seen = HashSet::new();
            for entry in entries {
                if !is_plain_file_name(&entry.name) {
                    return Err(InstallError::UnsafeAssetName(entry.name.clone()).into());
                }
                if !seen.insert(entry.name.as_str()) {
                    return Err(InstallError::DuplicateAssetName(entry.name.clone()).into());
                }
            }
        }
        Ok(())
    }
}

/// Writes the manifest document as compact JSON, replacing any previous file.
pub fn persist(path: &Path, document: &Value) -> Result<()> {
    let content = serde_json::to_string(document)?;
    fs::write(path, content).context(format!("Failed to write manifest file: {:?}", path))?;
    Ok(())
}

/// A name is usable only if it resolves to exactly itself inside the target directory.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(component)), None) => component == name,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Value {
        json!({
            "data": {
                "images": [
                    { "name": "welcome.png", "url": "https://example.com/images/welcome.png" },
                    { "name": "rank.png", "url": "https://example.com/images/rank.png" }
                ],
                "fonts": [
                    { "name": "Manrope.ttf", "url": "https://example.com/fonts/Manrope.ttf" }
                ],
                "version": 3
            }
        })
    }

    #[test]
    fn test_parse_manifest_document() -> Result<()> {
        let manifest = Manifest::from_json_value(&sample_document())?;

        assert_eq!(manifest.images.len(), 2);
        assert_eq!(manifest.fonts.len(), 1);
        assert_eq!(manifest.images[0].name, "welcome.png");
        assert_eq!(manifest.fonts[0].url, "https://example.com/fonts/Manrope.ttf");
        Ok(())
    }

    #[test]
    fn test_entries_lists_images_before_fonts() -> Result<()> {
        let manifest = Manifest::from_json_value(&sample_document())?;
        let order: Vec<_> = manifest
            .entries()
            .map(|(kind, entry)| (kind, entry.name.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![
                (AssetKind::Image, "welcome.png"),
                (AssetKind::Image, "rank.png"),
                (AssetKind::Font, "Manrope.ttf"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_missing_category_is_empty() -> Result<()> {
        let manifest = Manifest::from_json_value(&json!({ "data": { "images": [] } }))?;
        assert!(manifest.is_empty());
        Ok(())
    }

    #[test]
    fn test_rejects_null_and_wrong_shape() {
        for document in [Value::Null, json!({ "images": [] }), json!({ "data": "nope" })] {
            let err = Manifest::from_json_value(&document).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<InstallError>(),
                Some(InstallError::InvalidManifest(_))
            ));
        }
    }

    #[test]
    fn test_rejects_unsafe_names() {
        for name in ["../escape.png", "nested/font.ttf", "", ".", "..", "/etc/passwd"] {
            let document = json!({
                "data": { "images": [], "fonts": [{ "name": name, "url": "https://example.com/x" }] }
            });
            let err = Manifest::from_json_value(&document).unwrap_err();
            assert_eq!(
                err.downcast_ref::<InstallError>(),
                Some(&InstallError::UnsafeAssetName(name.to_string())),
                "name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_duplicate_names_within_category() {
        let document = json!({
            "data": {
                "images": [
                    { "name": "rank.png", "url": "https://example.com/a/rank.png" },
                    { "name": "rank.png", "url": "https://example.com/b/rank.png" }
                ],
                "fonts": []
            }
        });
        let err = Manifest::from_json_value(&document).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InstallError>(),
            Some(&InstallError::DuplicateAssetName("rank.png".to_string()))
        );
    }

    #[test]
    fn test_same_name_allowed_across_categories() -> Result<()> {
        let document = json!({
            "data": {
                "images": [{ "name": "logo", "url": "https://example.com/images/logo" }],
                "fonts": [{ "name": "logo", "url": "https://example.com/fonts/logo" }]
            }
        });
        assert_eq!(Manifest::from_json_value(&document)?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_persist_and_load() -> Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("meta.json");

        persist(&path, &sample_document())?;

        let stored: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(stored, sample_document());
        assert_eq!(Manifest::load(&path)?.len(), 3);
        Ok(())
    }
}

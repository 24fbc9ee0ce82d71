use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::DeckError;
use crate::slide::Slide;

/// What a collaborator hands over: ordered slides plus an optional deck-level image
/// used when a slide's own image is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuppliedDeck {
    pub slides: Vec<Slide>,
    pub fallback_image: Option<PathBuf>,
}

impl From<Vec<Slide>> for SuppliedDeck {
    fn from(slides: Vec<Slide>) -> Self {
        Self { slides, fallback_image: None }
    }
}

pub trait SlideSource {
    fn fetch(&self) -> Result<SuppliedDeck, DeckError>;

    fn describe(&self) -> String;
}

pub struct StaticSource(pub SuppliedDeck);

impl SlideSource for StaticSource {
    fn fetch(&self) -> Result<SuppliedDeck, DeckError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory slides", self.0.slides.len())
    }
}

/// The slides that ship with the binary.
pub struct BuiltInSource;

impl SlideSource for BuiltInSource {
    fn fetch(&self) -> Result<SuppliedDeck, DeckError> {
        Ok(crate::deck::default_slides().into())
    }

    fn describe(&self) -> String {
        "built-in deck".to_string()
    }
}

pub struct JsonDeckSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeckFile {
    Bare(Vec<Slide>),
    Full {
        #[serde(default, alias = "fallbackImage")]
        fallback_image: Option<PathBuf>,
        slides: Vec<Slide>,
    },
}

impl JsonDeckSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SlideSource for JsonDeckSource {
    fn fetch(&self) -> Result<SuppliedDeck, DeckError> {
        let text = fs::read_to_string(&self.path).map_err(|source| DeckError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: DeckFile = serde_json::from_str(&text).map_err(|source| DeckError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let (mut slides, fallback_image) = match file {
            DeckFile::Bare(slides) => (slides, None),
            DeckFile::Full { fallback_image, slides } => (slides, fallback_image),
        };

        // Image paths in a deck file are relative to the file itself
        let base = self.path.parent().unwrap_or_else(|| Path::new("."));
        for slide in slides.iter_mut() {
            if let Some(image) = slide.image_ref.take() {
                slide.image_ref = Some(base.join(image));
            }
        }

        Ok(SuppliedDeck {
            slides,
            fallback_image: fallback_image.map(|image| base.join(image)),
        })
    }

    fn describe(&self) -> String {
        format!("deck file {}", self.path.display())
    }
}

/// Every image in a directory becomes a slide, ordered by file name.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SlideSource for DirectorySource {
    fn fetch(&self) -> Result<SuppliedDeck, DeckError> {
        let paths = load_sorted_image_paths(&self.dir)?;
        let slides = paths
            .into_iter()
            .map(|path| {
                let stem = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let title = stem.replace(['_', '-'], " ");
                let dir_name = self
                    .dir
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Slide::new(stem, title, dir_name).with_image(path)
            })
            .collect();
        Ok(SuppliedDeck { slides, fallback_image: None })
    }

    fn describe(&self) -> String {
        format!("image directory {}", self.dir.display())
    }
}

pub fn load_sorted_image_paths(dir: &Path) -> Result<Vec<PathBuf>, DeckError> {
    let io_error = |source| DeckError::Io { path: dir.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if !path.is_file() {
            continue;
        }
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif"));
        if is_image {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        Err(DeckError::NoImages(dir.to_path_buf()))
    } else {
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_full_deck_file_relative_to_its_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let deck_path = root.join("deck.json");
        fs::write(
            &deck_path,
            r#"{
                "fallback_image": "default.jpg",
                "slides": [
                    {"id": "a", "imageRef": "a.jpg", "title": "A", "subtitle": "first"},
                    {"id": "b", "title": "B", "subtitle": "second", "category": "news"}
                ]
            }"#,
        )
        .unwrap();

        let deck = JsonDeckSource::new(&deck_path).fetch().unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].image_ref, Some(root.join("a.jpg")));
        assert_eq!(deck.slides[1].image_ref, None);
        assert_eq!(deck.fallback_image, Some(root.join("default.jpg")));
    }

    #[test]
    fn reads_bare_array_deck_file() {
        let temp = TempDir::new().unwrap();
        let deck_path = temp.path().join("deck.json");
        fs::write(&deck_path, r#"[{"id": 1, "title": "One"}, {"id": 2, "title": "Two"}]"#).unwrap();

        let deck = JsonDeckSource::new(&deck_path).fetch().unwrap();
        let ids: Vec<_> = deck.slides.iter().map(|slide| slide.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(deck.fallback_image, None);
    }

    #[test]
    fn malformed_deck_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let deck_path = temp.path().join("deck.json");
        fs::write(&deck_path, "{ not json").unwrap();

        let err = JsonDeckSource::new(&deck_path).fetch().unwrap_err();
        assert!(matches!(err, DeckError::Parse { .. }));
    }

    #[test]
    fn missing_deck_file_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let err = JsonDeckSource::new(temp.path().join("absent.json")).fetch().unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
    }

    #[test]
    fn directory_source_orders_images_by_name() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for name in ["b_city.jpg", "a_coast.PNG", "notes.txt", "c-forest.gif"] {
            fs::write(root.join(name), b"").unwrap();
        }

        let deck = DirectorySource::new(root).fetch().unwrap();
        let ids: Vec<_> = deck.slides.iter().map(|slide| slide.id.as_str()).collect();
        assert_eq!(ids, ["a_coast", "b_city", "c-forest"]);
        assert_eq!(deck.slides[2].primary_text, "c forest");
        assert_eq!(deck.slides[0].image_ref, Some(root.join("a_coast.PNG")));
    }

    #[test]
    fn directory_without_images_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = DirectorySource::new(temp.path()).fetch().unwrap_err();
        assert!(matches!(err, DeckError::NoImages(_)));
    }
}

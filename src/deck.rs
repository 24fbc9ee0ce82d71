use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::constants::MIN_SUPPLIED_SLIDES;
use crate::slide::Slide;
use crate::source::{SlideSource, SuppliedDeck};

/// Ordered, read-only slides for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideDeck {
    slides: Vec<Slide>,
    fallback_image: Option<PathBuf>,
}

impl SlideDeck {
    /// Resolves the deck once at mount. A failing source, or one yielding fewer than
    /// three slides, is replaced by the built-in deck.
    pub fn resolve(source: &dyn SlideSource) -> SlideDeck {
        let supplied = match source.fetch() {
            Ok(supplied) => supplied,
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "slide source failed, using default deck");
                return SlideDeck::default_deck();
            }
        };

        if supplied.slides.len() < MIN_SUPPLIED_SLIDES {
            warn!(
                source = %source.describe(),
                supplied = supplied.slides.len(),
                "too few slides supplied, using default deck"
            );
            return SlideDeck::default_deck();
        }

        let deck = SlideDeck::from_supplied(supplied);
        info!(source = %source.describe(), slides = deck.len(), "slide deck resolved");
        deck
    }

    pub fn from_supplied(supplied: SuppliedDeck) -> SlideDeck {
        SlideDeck {
            slides: disambiguate_ids(supplied.slides),
            fallback_image: supplied.fallback_image,
        }
    }

    pub fn default_deck() -> SlideDeck {
        SlideDeck { slides: default_slides(), fallback_image: None }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    /// The slide's own image, or the deck-level fallback when it has none.
    pub fn image_ref(&self, index: usize) -> Option<&Path> {
        self.slides
            .get(index)
            .and_then(|slide| slide.image_ref.as_deref())
            .or(self.fallback_image.as_deref())
    }

    pub fn fallback_image(&self) -> Option<&Path> {
        self.fallback_image.as_deref()
    }
}

/// The built-in deck used when the collaborator has too little to show.
pub fn default_slides() -> Vec<Slide> {
    [
        ("default-1", "Beyond the Horizon", "Where every journey begins", "travel"),
        ("default-2", "Urban Rhythm", "Cities that never sleep", "culture"),
        ("default-3", "Wild Silence", "Into the untouched north", "nature"),
        ("default-4", "Deep Blue", "Stories from under the surface", "ocean"),
        ("default-5", "First Light", "Mornings above the clouds", "mountains"),
    ]
    .into_iter()
    .map(|(id, title, subtitle, category)| Slide::new(id, title, subtitle).with_category(category))
    .collect()
}

// Every id that occurs in the deck is reserved, so a rename never lands on an id
// that a later slide already carries.
fn disambiguate_ids(slides: Vec<Slide>) -> Vec<Slide> {
    let mut taken: HashSet<String> = slides.iter().map(|slide| slide.id.clone()).collect();
    let mut emitted: HashSet<String> = HashSet::new();
    slides
        .into_iter()
        .map(|mut slide| {
            if emitted.insert(slide.id.clone()) {
                return slide;
            }
            let mut n = 2;
            let renamed = loop {
                let candidate = format!("{}#{}", slide.id, n);
                if !taken.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            warn!(id = %slide.id, renamed = %renamed, "duplicate slide id");
            taken.insert(renamed.clone());
            emitted.insert(renamed.clone());
            slide.id = renamed;
            slide
        })
        .collect()
}

//! Bilingual phrase lexicon for the food domain.

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, SaffronError};

/// Built-in Vietnamese to English rewrite rules.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    // Proteins
    ("gà", "chicken"),
    ("thịt gà", "chicken"),
    ("cá", "fish salmon"),
    ("cá hồi", "salmon"),
    ("bò", "beef steak"),
    ("thịt bò", "beef steak"),
    ("heo", "pork ribs"),
    ("lợn", "pork"),
    ("sườn", "ribs"),
    ("vịt", "duck"),
    ("hải sản", "seafood shrimp scallop paella"),
    ("tôm", "shrimp"),
    ("sò", "scallop mussel"),
    ("nghêu", "mussel"),
    ("mực", "calamari"),
    // Dishes
    ("pizza", "pizza"),
    ("bánh mì", "bread toast"),
    ("mì ý", "pasta spaghetti lasagna carbonara"),
    ("pasta", "pasta spaghetti"),
    ("salad", "salad"),
    ("xà lách", "salad"),
    ("súp", "soup"),
    ("canh", "soup"),
    ("burger", "burger"),
    ("bánh ngọt", "cake dessert"),
    ("bánh", "cake bread pie pancake"),
    ("bánh pancake", "pancake"),
    ("khoai tây chiên", "fries french fries"),
    ("trứng", "omelette egg"),
    ("rau", "vegetable"),
    ("quả", "fruit"),
    // Drinks
    ("cà phê", "coffee espresso cappuccino latte"),
    ("cafe", "coffee"),
    ("nước", "juice water drink beverage"),
    ("nước cam", "orange juice"),
    ("nước chanh", "lemonade"),
    ("rượu", "wine beer"),
    ("rượu vang", "wine"),
    ("rượu vang đỏ", "red wine"),
    ("rượu vang trắng", "white wine"),
    ("bia", "beer craft beer"),
    ("cocktail", "mojito cocktail"),
    ("coca", "coca cola"),
    // Desserts
    ("tráng miệng", "dessert cake tiramisu cheesecake"),
    ("ngọt", "sweet dessert cake chocolate"),
    ("kem", "ice cream"),
    ("sô cô la", "chocolate lava cake"),
    ("socola", "chocolate"),
    ("tiramisu", "tiramisu"),
    ("pho mát", "cheese cheesecake"),
    ("phô mai", "cheese"),
    // Cooking methods
    ("nướng", "grilled roasted bbq"),
    ("rán", "fried crispy"),
    ("chiên", "fried crispy"),
    ("hấp", "steamed"),
    ("luộc", "boiled"),
    // Descriptors
    ("ngon", "delicious fresh tasty gourmet"),
    ("tươi", "fresh"),
    ("giòn", "crispy"),
    ("mềm", "tender soft"),
    ("béo", "creamy rich"),
    ("cay", "spicy pepper"),
];

/// One rewrite rule: a source phrase and its expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub phrase: String,
    pub expansion: String,
}

impl LexiconEntry {
    /// Create an entry. The phrase is stored NFC-composed and lowercased.
    pub fn new<P: AsRef<str>, E: Into<String>>(phrase: P, expansion: E) -> Self {
        LexiconEntry {
            phrase: canonical_phrase(phrase.as_ref()),
            expansion: expansion.into(),
        }
    }
}

/// Ordered mapping from Vietnamese phrases to English expansions.
///
/// Insertion order is kept; it decides between phrases of equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualLexicon {
    entries: Vec<LexiconEntry>,
}

impl BilingualLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in food lexicon.
    pub fn builtin() -> Self {
        let mut lexicon = Self::new();
        for (phrase, expansion) in BUILTIN_ENTRIES {
            lexicon.insert(*phrase, *expansion);
        }
        lexicon
    }

    /// Load a lexicon from a JSON file.
    ///
    /// The file holds an array of `{"phrase": ..., "expansion": ...}` objects:
    ///
    /// ```json
    /// [
    ///   {"phrase": "gà", "expansion": "chicken"},
    ///   {"phrase": "cà phê", "expansion": "coffee espresso"}
    /// ]
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SaffronError::config(format!(
                "Failed to read lexicon file '{}': {e}",
                path.display()
            ))
        })?;
        let raw: Vec<LexiconEntry> = serde_json::from_str(&content).map_err(|e| {
            SaffronError::config(format!(
                "Failed to parse lexicon JSON from '{}': {e}",
                path.display()
            ))
        })?;

        let mut lexicon = Self::new();
        for entry in raw {
            lexicon.insert(entry.phrase, entry.expansion);
        }
        debug!("loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Load the configured lexicon, or the built-in one when no path is set
    /// or the file cannot be used.
    pub fn from_optional_file(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                warn!("{e}; using built-in lexicon");
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }

    /// Add a rule, replacing the expansion of an existing phrase in place.
    pub fn insert<P: AsRef<str>, E: Into<String>>(&mut self, phrase: P, expansion: E) {
        let entry = LexiconEntry::new(phrase, expansion);
        if entry.phrase.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|e| e.phrase == entry.phrase) {
            Some(existing) => existing.expansion = entry.expansion,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, phrase: &str) -> Option<&str> {
        let phrase = canonical_phrase(phrase);
        self.entries
            .iter()
            .find(|e| e.phrase == phrase)
            .map(|e| e.expansion.as_str())
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Entries ordered longest phrase first (character count); equal lengths
    /// keep insertion order.
    pub fn by_priority(&self) -> Vec<&LexiconEntry> {
        let mut ordered: Vec<&LexiconEntry> = self.entries.iter().collect();
        ordered.sort_by(|a, b| b.phrase.chars().count().cmp(&a.phrase.chars().count()));
        ordered
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn canonical_phrase(phrase: &str) -> String {
    phrase.trim().nfc().collect::<String>().to_lowercase()
}

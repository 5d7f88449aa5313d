use once_cell::sync::Lazy;

use crate::models::WordPair;

/// Starter vocabulary used until the user saves a list of their own
pub static DEFAULT_WORDS: Lazy<Vec<WordPair>> = Lazy::new(|| {
    [
        ("huis", "house"),
        ("kat", "cat"),
        ("hond", "dog"),
        ("boom", "tree"),
        ("water", "water"),
        ("brood", "bread"),
        ("fiets", "bicycle"),
        ("boek", "book"),
        ("stoel", "chair"),
        ("tafel", "table"),
        ("appel", "apple"),
        ("melk", "milk"),
        ("vriend", "friend"),
        ("straat", "street"),
        ("zon", "sun"),
        ("maan", "moon"),
        ("regen", "rain"),
        ("sleutel", "key"),
        ("raam", "window"),
        ("deur", "door"),
        ("kaas", "cheese"),
        ("vogel", "bird"),
        ("winkel", "shop"),
        ("trein", "train"),
    ]
    .into_iter()
    .map(|(foreign, translation)| WordPair::new(foreign, translation))
    .collect()
});

pub fn default_words() -> Vec<WordPair> {
    DEFAULT_WORDS.clone()
}

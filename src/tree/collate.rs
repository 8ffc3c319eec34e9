//! Locale-style name collation
//!
//! Sibling names compare under the Unicode Collation Algorithm with the CLDR root
//! collation at tertiary strength: punctuation and symbols before digits, digits
//! before letters, accents as a secondary difference and lowercase before
//! uppercase. Names the collator considers equal fall back to code-point order so
//! the result is total.

use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use tracing::warn;

thread_local! {
    static ROOT_COLLATOR: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!(error = %e, "Root collation unavailable, ordering names by code point");
            None
        }
    }
}

/// Compare two sibling names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}

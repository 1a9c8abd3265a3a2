//! Qualification map construction
//!
//! For every canonical sequence containing U+FE0F, derives each combination
//! obtained by independently keeping or dropping the variation selectors (2^k
//! combinations for k occurrences) and maps the variant back to its canonical
//! form. When two canonical sequences derive the same variant, the first one
//! in dataset order wins and later collisions are discarded.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Emoji variation selector (VS16).
pub(crate) const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Observed real-world sequences stay well under this inline capacity.
type Codepoints = SmallVec<[char; 8]>;

/// Builds the variant -> canonical lookup table from `canonical`, which must
/// be in dataset order for the first-wins collision policy to hold.
pub(crate) fn qualification_map(canonical: &IndexSet<String>) -> FxHashMap<String, String> {
    let mut map = FxHashMap::default();

    for sequence in canonical {
        if !sequence.contains(VARIATION_SELECTOR) {
            continue;
        }

        let codepoints: Codepoints = sequence.chars().collect();
        for variant in variants(&codepoints) {
            if variant == *sequence || map.contains_key(&variant) {
                continue;
            }
            map.insert(variant, sequence.clone());
        }
    }

    map
}

/// Every keep-or-drop combination over the U+FE0F occurrences in
/// `codepoints`, rendered back to strings. Non-selector codepoints keep their
/// relative order in every combination.
fn variants(codepoints: &[char]) -> Vec<String> {
    let (head, rest) = match codepoints.split_first() {
        Some(split) => split,
        None => return vec![String::new()],
    };

    let tails = variants(rest);
    if *head == VARIATION_SELECTOR {
        // Each selector forks the result set: once dropped, once kept.
        let mut combined = Vec::with_capacity(tails.len() * 2);
        combined.extend(tails.iter().cloned());
        combined.extend(tails.iter().map(|tail| prepend(*head, tail)));
        combined
    } else {
        tails.iter().map(|tail| prepend(*head, tail)).collect()
    }
}

fn prepend(head: char, tail: &str) -> String {
    let mut out = String::with_capacity(head.len_utf8() + tail.len());
    out.push(head);
    out.push_str(tail);
    out
}

//! Interest tag validation and normalization.
//!
//! A room carries a set of interest tags drawn from a fixed catalog.
//! Tags are accepted case-insensitively with surrounding whitespace,
//! then stored in canonical form (trimmed, lower-cased, sorted,
//! duplicate-free). Rewriting an unchanged set is a no-op.

/// The known interest topics. Anything outside this list is a format error.
pub const INTEREST_CATALOG: &[&str] = &[
    "art",
    "books",
    "food",
    "games",
    "movies",
    "music",
    "science",
    "sports",
    "technology",
    "travel",
];

fn canonical(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Check that every tag resolves to a catalog entry and no entry is named
/// twice. Must pass before any mutation touches the store.
pub fn is_valid_room_interests(tags: &[String]) -> bool {
    let mut seen: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let canon = canonical(tag);
        if !INTEREST_CATALOG.contains(&canon.as_str()) {
            return false;
        }
        if seen.contains(&canon) {
            return false;
        }
        seen.push(canon);
    }
    true
}

/// Rewrite a validated tag set into its canonical stored form.
/// Idempotent: normalizing an already-normalized set returns it unchanged.
pub fn normalize(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = tags.iter().map(|t| canonical(t)).collect();
    out.sort();
    out.dedup();
    out
}

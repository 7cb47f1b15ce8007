// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Deterministic changeset file naming.
//!
//! The slug is three words picked by hashing the PR head branch and the
//! update-type name, so a re-run for the same PR and group lands on the
//! same filename. That is what makes re-run dedupe possible: an existing
//! file with the expected slug means the changeset is already covered.

use sha2::{Digest, Sha256};

const ADJECTIVES: &[&str] = &[
    "amber", "brave", "calm", "dusty", "eager", "fuzzy", "gentle", "happy",
    "icy", "jolly", "kind", "lucky", "mellow", "neat", "odd", "proud",
    "quick", "rusty", "shiny", "tall", "upbeat", "vivid", "warm", "young",
    "zesty", "bright", "clever", "daring", "early", "fresh", "grand", "humble",
];

const NOUNS: &[&str] = &[
    "ants", "bears", "cats", "dogs", "eagles", "foxes", "goats", "hawks",
    "ibises", "jays", "koalas", "lions", "moles", "newts", "otters", "pandas",
    "quails", "rams", "seals", "tigers", "urchins", "voles", "wolves", "yaks",
    "zebras", "cranes", "drakes", "finches", "geese", "herons", "kites", "larks",
];

const VERBS: &[&str] = &[
    "argue", "bake", "cheer", "dance", "explore", "fly", "gather", "hum",
    "invent", "joke", "kneel", "laugh", "march", "nod", "observe", "play",
    "question", "rest", "sing", "travel", "unite", "visit", "wander", "yawn",
    "zoom", "build", "climb", "dream", "eat", "float", "grin", "hide",
];

/// Derive the changeset slug for one (branch, update type) pair.
pub fn changeset_slug(branch: &str, update_type: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(branch.as_bytes());
    hasher.update(b"\n");
    hasher.update(update_type.as_bytes());
    let digest = hasher.finalize();

    format!(
        "renoset-{}-{}-{}",
        ADJECTIVES[digest[0] as usize % ADJECTIVES.len()],
        NOUNS[digest[1] as usize % NOUNS.len()],
        VERBS[digest[2] as usize % VERBS.len()],
    )
}

/// Hex digest used when a collision forces a disambiguating suffix.
pub fn content_digest(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    hex::encode(&digest[..4])
}

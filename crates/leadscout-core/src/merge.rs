//! Batch merge and deduplication for listings.

use std::collections::HashSet;

use crate::listing::Listing;

/// Concatenates all batches, deduplicates by `place_id` keeping the first
/// occurrence encountered, and stable-sorts by `(search_term, name)` ascending
/// (byte order).
///
/// Empty input yields empty output; there are no error conditions.
#[must_use]
pub fn merge_batches(batches: Vec<Vec<Listing>>) -> Vec<Listing> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<Listing> = Vec::new();

    for batch in batches {
        for listing in batch {
            if seen.insert(listing.place_id.clone()) {
                merged.push(listing);
            }
        }
    }

    merged.sort_by(|a, b| {
        a.search_term
            .cmp(&b.search_term)
            .then_with(|| a.name.cmp(&b.name))
    });
    merged
}

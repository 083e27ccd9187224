use std::collections::HashSet;

use url::Url;

use crate::extractor::model::VideoItem;

/// Drop items whose canonical link was already seen; the first occurrence
/// wins and order is preserved. Duplicates are expected — the same video can
/// appear in several page sections — so they are silently dropped rather
/// than reported.
pub fn dedup_by_link(items: Vec<VideoItem>) -> Vec<VideoItem> {
    let mut seen: HashSet<Url> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.link.clone()))
        .collect()
}

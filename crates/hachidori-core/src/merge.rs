//! Merge one library record with its detail record into a [`LibraryEntry`].

use hachidori_api::{DetailRecord, RawLibraryRecord};

use crate::models::{LibraryEntry, LibraryStatus};

/// Build the canonical entry for one library item.
///
/// `detail` is `None` when the detail fetch failed; every detail field then
/// takes its default (empty text, `0.0`, no genres). The title falls back
/// to the list record's embedded title, then to the remote id, so an entry
/// always has a non-empty key.
pub fn merge(raw: &RawLibraryRecord, detail: Option<&DetailRecord>) -> LibraryEntry {
    let empty = DetailRecord::default();
    let detail = detail.unwrap_or(&empty);

    let title = [&detail.title, &raw.fallback_title, &raw.remote_id]
        .into_iter()
        .find(|t| !t.is_empty())
        .cloned()
        .unwrap_or_else(|| String::from("(untitled)"));

    LibraryEntry {
        title,
        remote_id: raw.remote_id.clone(),
        synopsis: detail.synopsis.clone(),
        airing_status: detail.airing_status.clone(),
        episode_count: detail.episode_count.clone(),
        show_type: detail.show_type.clone(),
        status: LibraryStatus::from_service_str(&raw.status_code),
        episodes_watched: raw.episodes_watched_raw.clone(),
        user_rating: raw.user_rating_raw.clone(),
        community_rating: detail.community_rating,
        genres: detail.genre_names.clone(),
    }
}

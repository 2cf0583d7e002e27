//! Console formatting for library entries.

use hachidori_core::{LibraryEntry, LibraryStatus};

fn or_unknown(s: &str) -> &str {
    if s.is_empty() {
        "?"
    } else {
        s
    }
}

/// `watched/total`, with `?` standing in for unknown counts.
pub fn progress(entry: &LibraryEntry) -> String {
    format!(
        "{}/{}",
        or_unknown(&entry.episodes_watched),
        or_unknown(&entry.episode_count)
    )
}

/// One line of a status list. Only the watching list shows progress.
pub fn list_line(entry: &LibraryEntry) -> String {
    match entry.status {
        LibraryStatus::CurrentlyWatching => format!("\"{}\" ({})", entry.title, progress(entry)),
        _ => format!("\"{}\"", entry.title),
    }
}

pub fn community_rating(rating: f64) -> String {
    format!("{rating:.2}/5")
}

/// The full detail card for one show.
pub fn details(entry: &LibraryEntry) -> String {
    format!(
        "\"{title}\"\n\
         #Synopsis: {synopsis}\n\
         #Status: {airing}\n\
         #Type: {show_type}\n\
         #Genres: {genres}\n\
         #Community Rating: {rating}\n\
         #Watched: {progress}\n\
         #Rating: {user_rating}\n",
        title = entry.title,
        synopsis = entry.synopsis,
        airing = entry.airing_status,
        show_type = entry.show_type,
        genres = entry.genres.join(", "),
        rating = community_rating(entry.community_rating),
        progress = progress(entry),
        user_rating = entry.user_rating,
    )
}

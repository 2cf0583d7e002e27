use serde::{Deserialize, Serialize};

/// Where a show sits in the user's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryStatus {
    CurrentlyWatching,
    PlanToWatch,
    Completed,
    OnHold,
    Dropped,
    Undefined,
}

impl LibraryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentlyWatching => "Currently Watching",
            Self::PlanToWatch => "Plan to Watch",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Dropped => "Dropped",
            Self::Undefined => "Undefined",
        }
    }

    /// Map the service's status code. Exact and case-sensitive; anything
    /// unrecognised is `Undefined`.
    pub fn from_service_str(s: &str) -> Self {
        match s {
            "currently-watching" => Self::CurrentlyWatching,
            "plan-to-watch" => Self::PlanToWatch,
            "completed" => Self::Completed,
            "on-hold" => Self::OnHold,
            "dropped" => Self::Dropped,
            _ => Self::Undefined,
        }
    }

    /// Statuses a user can actually put a show in.
    pub const ALL: &[LibraryStatus] = &[
        Self::CurrentlyWatching,
        Self::PlanToWatch,
        Self::Completed,
        Self::OnHold,
        Self::Dropped,
    ];
}

impl std::fmt::Display for LibraryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A library item merged with its catalog metadata.
///
/// Numeric counters and the user's rating are kept as the text the service
/// delivered; the `*_count`/`user_score` helpers parse them on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub title: String,
    pub remote_id: String,
    pub synopsis: String,
    pub airing_status: String,
    pub episode_count: String,
    #[serde(rename = "type")]
    pub show_type: String,
    pub status: LibraryStatus,
    pub episodes_watched: String,
    pub user_rating: String,
    pub community_rating: f64,
    pub genres: Vec<String>,
}

impl LibraryEntry {
    pub fn episodes_watched_count(&self) -> Option<u32> {
        self.episodes_watched.trim().parse().ok()
    }

    pub fn episode_total(&self) -> Option<u32> {
        self.episode_count.trim().parse().ok()
    }

    pub fn user_score(&self) -> Option<f64> {
        self.user_rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
    }
}

use crate::types::{Track, UserComment};
use serde::{Deserialize, Serialize};

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Entries on this page
    pub items: Vec<T>,

    /// 1-based page number
    pub page_number: u32,

    /// Whether another page follows
    #[serde(default)]
    pub has_next_page: bool,
}

/// Page of tracks (uploads, recent plays, recent likes)
pub type TrackPage = Page<Track>;

/// Page of a user's comments across tracks
pub type UserCommentPage = Page<UserComment>;

impl<T> Page<T> {
    /// Page number to request next, if any
    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page.then_some(self.page_number + 1)
    }
}

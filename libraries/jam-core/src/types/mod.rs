mod comment;
mod ids;
mod interaction;
mod page;
mod track;

pub use comment::{Comment, UserComment};
pub use ids::{CommentId, TrackId, UserId};
pub use interaction::InteractionSnapshot;
pub use page::{Page, TrackPage, UserCommentPage};
pub use track::{parse_duration_secs, Track};

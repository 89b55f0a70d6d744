mod envelope;
pub use self::envelope::{Envelope, Page};

mod user;
pub use self::user::{AuthPayload, User, UserID, UserSummary, Visibility};

mod post;
pub use self::post::{Comment, CommentAuthor, Notification, Post, PostAuthor, PostID};

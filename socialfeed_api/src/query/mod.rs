mod common;
pub use self::common::{PageQuery, Query};

mod search;
pub use self::search::UserSearchQuery;

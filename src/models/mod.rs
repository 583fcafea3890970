mod profile;
mod search;
mod user;
mod watch_event;

pub use profile::Profile;
pub use search::{ResultKind, SearchMode, SearchResult, TmdbMovie, TmdbPerson, TmdbTvShow};
pub use user::User;
pub use watch_event::{WatchEvent, PLACEHOLDER_MOVIE_ID};

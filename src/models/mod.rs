pub mod genre;
pub mod movie;
pub mod options;

pub use genre::GenreSet;
pub use movie::{ListMoviesResponse, Movie};
pub use options::{OptionChange, OptionError, OrderBy, QueryOptions, Quality, SortBy};

mod film_repo;
mod lookup_repo;
mod user_repo;

pub use film_repo::*;
pub use lookup_repo::*;
pub use user_repo::*;

mod repo_error;

pub use repo_error::*;

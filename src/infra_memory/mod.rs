mod film_repo_memory;
mod lookup_repo_memory;
mod user_repo_memory;

pub use film_repo_memory::*;
pub use lookup_repo_memory::*;
pub use user_repo_memory::*;

mod store;

pub use store::{MemoryStore, Sequence, default_genres, default_mpa};

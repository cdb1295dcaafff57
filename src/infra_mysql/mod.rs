mod film_repo_mysql;
mod lookup_repo_mysql;
mod user_repo_mysql;

pub use film_repo_mysql::*;
pub use lookup_repo_mysql::*;
pub use user_repo_mysql::*;

mod rows;

pub use rows::*;

mod util;

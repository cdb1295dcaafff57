mod film;
mod friend;
mod lookup;
mod unit;
mod user;
mod validation;

pub use film::*;
pub use friend::*;
pub use lookup::*;
pub use unit::*;
pub use user::*;
pub use validation::*;

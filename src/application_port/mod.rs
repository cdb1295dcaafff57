mod film_service;
mod lookup_service;
mod service_error;
mod user_service;

pub use film_service::*;
pub use lookup_service::*;
pub use service_error::*;
pub use user_service::*;

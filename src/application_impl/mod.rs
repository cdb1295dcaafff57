mod film_service_impl;
mod lookup_service_impl;
mod user_service_impl;

pub use film_service_impl::*;
pub use lookup_service_impl::*;
pub use user_service_impl::*;

pub mod handlers;
pub mod requests;
pub mod routes;
pub mod services;

pub use routes::routes;

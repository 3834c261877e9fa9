pub mod routes;
pub mod server;
pub mod services;

pub use routes::routes;
pub use server::start_server;
pub use services::build_state;

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod routes;

pub use error::ApiError;
pub use handlers::AppState;
pub use responses::*;
pub use routes::create_router;

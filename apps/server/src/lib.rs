pub mod logging;
pub mod responses;
pub mod routes;
pub mod static_files;
pub mod server;

pub use logging::init_logging;
pub use responses::ApiResponse;
pub use routes::{handle, route, Route};
pub use server::{run, GalleryServer};

pub mod errors;
pub mod filters;
pub mod goal;
pub mod models;
pub mod repo;
pub mod scheduler;
pub mod session;
pub mod stats;

pub use errors::*;
pub use filters::*;
pub use goal::*;
pub use models::*;
pub use repo::*;
pub use scheduler::*;
pub use session::*;
pub use stats::*;

pub mod animator;
pub mod clock;
pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod geo;
pub mod host;
pub mod results;
pub mod scheduler;
pub mod session;
pub mod tracker;
pub mod trajectory;

pub use animator::*;
pub use clock::*;
pub use config::*;
pub use effects::*;
pub use error::*;
pub use geo::*;
pub use host::*;
pub use results::*;
pub use scheduler::*;
pub use session::*;
pub use tracker::*;
pub use trajectory::*;

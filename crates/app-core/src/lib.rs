pub mod catch;
pub mod constants;
pub mod motion;
pub mod random;
pub mod scheduler;
pub mod session;
pub mod state;

pub use catch::*;
pub use constants::*;
pub use motion::Oscillation;
pub use random::*;
pub use scheduler::*;
pub use session::*;
pub use state::*;

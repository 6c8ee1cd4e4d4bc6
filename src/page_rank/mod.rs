mod traits;
pub use self::traits::*;

pub mod iterated;
pub mod sampled;
pub mod transition;
pub use self::transition::TransitionModel;

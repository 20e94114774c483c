pub use self::{round::*, scribbler::*};

pub(crate) mod round;
pub(crate) mod scribbler;

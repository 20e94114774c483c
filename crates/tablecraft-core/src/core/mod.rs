pub use self::{piece::*, point::*, template::*};

pub(crate) mod piece;
pub(crate) mod point;
pub(crate) mod template;

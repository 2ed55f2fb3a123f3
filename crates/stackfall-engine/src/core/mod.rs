pub use self::{grid::*, shape::*};

pub(crate) mod grid;
pub(crate) mod shape;

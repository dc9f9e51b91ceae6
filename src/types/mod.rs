//! Data types shared by the generator, resolvers and renderers.

mod active_set;
mod style;

pub use active_set::*;
pub use style::*;

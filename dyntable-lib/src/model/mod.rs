//! Item and value models

mod item;
mod value;

pub use item::*;
pub use value::*;

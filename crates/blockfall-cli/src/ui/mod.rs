pub use self::{input::*, renderer::*};

mod input;
mod renderer;
pub mod widgets;

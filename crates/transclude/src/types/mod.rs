mod invocation;
mod section;

pub use invocation::{Argument, Invocation};
pub use section::Section;

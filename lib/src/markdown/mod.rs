mod plugin;
mod render;
mod breaks;
mod autolink;

pub use plugin::*;
pub use render::*;
pub use breaks::*;
pub use autolink::*;

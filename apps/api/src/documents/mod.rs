pub mod bucket;
pub mod content;
pub mod handlers;
pub mod naming;
pub mod renderer;

#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_expansion_to_png, NodeStyle, RenderConfig};

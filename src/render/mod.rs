mod renderer;
mod viewport;

pub use renderer::Renderer;
pub use viewport::Viewport;

pub use text::Text;
pub use window::Window;

mod text;
mod window;

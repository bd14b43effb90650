pub mod context;
pub mod text;

pub use context::ContextCursor;
pub use text::TextCursor;

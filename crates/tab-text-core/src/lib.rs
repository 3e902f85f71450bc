pub mod document;
pub mod scanner;
pub mod search;
pub mod settings;

// Re-export commonly used types
pub use document::Document;
pub use search::find_first;
pub use settings::{FontSpec, Settings, Transition};

pub mod modern;
pub mod pipe;
pub mod styles;
pub mod util;

// Re-export the shared formatting helpers so callers can use
// `crate::ui::progress_label(...)`.
pub use util::{gauge_ratio, progress_label};

pub mod images;
pub mod timeline;

pub use images::{GcpConfig, ImageEnv, ImageResolver};
pub use timeline::{all_images, by_id, current_progress, format_date, progress_at, TIMELINE};

pub mod batch;
pub mod executor;
pub mod resize;

pub use batch::{BatchConfig, BatchCoordinator, BatchSummary, FolderOutcome, FolderWorker};
pub use executor::{DerivativeProcessor, DerivativeWriter};
pub use resize::{FINAL_WIDTH, THUMBNAIL_WIDTH, resize_to_width, target_height};

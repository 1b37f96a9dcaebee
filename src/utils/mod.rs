pub mod error;
pub mod formats;
pub mod fs;

pub use error::{
    BatchError,
    BatchResult,
    ProcessingError,
    ProcessingResult,
    StoreError,
    StoreResult,
};
pub use formats::{ImageFormat, format_from_extension, is_eligible};
pub use fs::{
    ensure_dir,
    ensure_parent_dir,
    extract_filename,
    list_eligible_files,
    list_subfolders,
};

pub mod error;
pub mod export;
pub mod format;
pub mod interactive;
pub mod output;
pub mod pagination;

pub use interactive::*;
pub use output::{print_info, print_success, print_warning};

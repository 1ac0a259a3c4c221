mod error;
mod io_utils;
mod util;

pub use error::Error;
pub use io_utils::{ensure_outdir, tab_output_path};
pub use util::{handle_error_and_exit, Result};

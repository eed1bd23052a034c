//! System-level modules
//!
//! - Logging initialization
//! - Panic reporting

pub mod logging;
pub mod panic_handler;

pub use logging::{build_dispatch, init_logging};
pub use panic_handler::{PanicStyle, install_panic_hook, panic_message};

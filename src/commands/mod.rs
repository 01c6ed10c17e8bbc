//! Command implementations behind the `lmt` binary.

mod config;
mod extract;
mod list;
mod tangle;
mod watch;

pub use config::show_config;
pub use extract::{concat, extract, ExtractOptions};
pub use list::{list, ListOptions};
pub use tangle::{tangle, TangleOptions};
pub use watch::{watch, WatchOptions};

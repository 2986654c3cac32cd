pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, OutputFormatArg, PlatformsArgs};
pub use handlers::{handle_detect, handle_platforms};
pub use output::{OutputFormat, OutputFormatter, PlatformSummary};

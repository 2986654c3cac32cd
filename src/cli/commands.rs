use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Multi-signal platform detection for source trees
#[derive(Parser, Debug)]
#[command(
    name = "stackprobe",
    about = "Detect the language, framework and build tool of a source tree",
    version,
    author,
    long_about = "stackprobe walks a source tree, gathers weighted evidence for every \
                  supported platform and reports each candidate with a confidence score, \
                  a reliability tier and the build/install commands it implies."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect platforms in a source tree",
        long_about = "Scores every registered platform against the tree and prints the \
                      ranked detections.\n\n\
                      Examples:\n  \
                      stackprobe detect\n  \
                      stackprobe detect /path/to/repo\n  \
                      stackprobe detect --min-confidence 0.45 --format json"
    )]
    Detect(DetectArgs),

    #[command(
        about = "List supported platforms",
        long_about = "Lists the registered platforms with their primary marker files.\n\n\
                      Examples:\n  \
                      stackprobe platforms\n  \
                      stackprobe platforms --format json"
    )]
    Platforms(PlatformsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the source tree (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        short = 'c',
        long,
        value_name = "SCORE",
        help = "Minimum confidence (0.0-1.0) for a detection to be reported [env: STACKPROBE_MIN_CONFIDENCE]"
    )]
    pub min_confidence: Option<f64>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "N", help = "Maximum directory depth to walk")]
    pub max_depth: Option<usize>,

    #[arg(long, value_name = "N", help = "Maximum number of tree entries to index")]
    pub max_files: Option<usize>,

    #[arg(long, help = "Run detectors one after another instead of in parallel")]
    pub sequential: bool,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Abort detection after this many seconds"
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlatformsArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

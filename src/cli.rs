//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use lectern_core::convert::{DEFAULT_DPI, DEFAULT_JPEG_QUALITY};

/// Crawl course pages, download lecture PDFs once, and re-encode scanned PDFs.
///
/// Lectern resolves the set of pages to scan from up to two glob-style
/// patterns (week pages linked from the start page, lecture pages linked
/// from each week page), downloads every linked PDF exactly once, then
/// re-encodes each downloaded PDF into a smaller lossy copy under an
/// `image/` subdirectory. Rerunning the same invocation does no redundant
/// work.
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(author, version, about)]
pub struct Args {
    /// Start page URL (the course or term index page)
    pub start_url: Url,

    /// Pattern for week pages linked from the start page; empty means
    /// scan only the start page. `*` matches one or more non-slash
    /// characters; a leading `/` matches the whole URL path, otherwise
    /// only the last path segment is matched.
    #[arg(short = 'w', long, default_value = "")]
    pub week_pattern: String,

    /// Pattern for lecture pages linked from each week page; empty stops
    /// the traversal at the week level
    #[arg(short = 'l', long, default_value = "")]
    pub lecture_pattern: String,

    /// Root download directory
    #[arg(short, long, default_value = "downloads")]
    pub output: PathBuf,

    /// Subdirectory of the output root for this invocation
    #[arg(short, long)]
    pub subdir: Option<String>,

    /// Prefix prepended to every downloaded filename
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Skip the PDF re-encoding pass
    #[arg(long)]
    pub no_convert: bool,

    /// Render resolution for re-encoding, in DPI
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(36..=600))]
    pub dpi: u32,

    /// JPEG quality (1-100) for re-encoded pages
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: u8,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

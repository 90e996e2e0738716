use clap::Parser;
use std::path::PathBuf;

/// Copy camera images into a `{year}/{month}` tree, renamed from their EXIF model and capture time.
#[derive(Clone, Debug, Parser)]
#[command(name = "photo-organizer")]
#[command(about = "Copy camera images into YEAR/MONTH folders named after their EXIF data.")]
pub struct Cli {
    /// Source directory to copy from.
    #[arg(long, short = 's', value_name = "DIR")]
    pub source_dir: PathBuf,

    /// Destination directory to copy to.
    #[arg(long, short = 'd', value_name = "DIR")]
    pub dest_dir: PathBuf,

    /// Number of parallel workers copying images. Default: 2.
    #[arg(long, short = 'n', value_parser = clap::value_parser!(usize))]
    pub num_workers: Option<usize>,

    /// Image extensions to pick up (case-insensitive). Replaces the default set: -e jpg arw nef
    #[arg(long = "ext", short = 'e', num_args = 1..)]
    pub extensions: Vec<String>,

    /// Highest collision index tried for one timestamp and model before the image fails.
    #[arg(long, value_parser = clap::value_parser!(u32))]
    pub max_collisions: Option<u32>,

    /// Follow symbolic links in the source tree.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Show a progress bar.
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,

    /// Print the final report as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Exit with a non-zero status when any image failed.
    #[arg(long)]
    pub fail_on_error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_dirs_and_flags() {
        let cli = Cli::try_parse_from([
            "photo-organizer",
            "-s",
            "/in",
            "-d",
            "/out",
            "-n",
            "4",
            "-e",
            "jpg",
            "nef",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.source_dir, PathBuf::from("/in"));
        assert_eq!(cli.dest_dir, PathBuf::from("/out"));
        assert_eq!(cli.num_workers, Some(4));
        assert_eq!(cli.extensions, vec!["jpg", "nef"]);
        assert_eq!(cli.verbose, Some(true));
        assert_eq!(cli.progress, None);
        assert!(!cli.json);
    }

    #[test]
    fn dirs_are_required() {
        assert!(Cli::try_parse_from(["photo-organizer", "-s", "/in"]).is_err());
    }
}

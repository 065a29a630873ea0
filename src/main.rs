use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use nimshare::{Scheme, operations};
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "\
Examples:
  nimshare -m 7 -k 4 plaintextfile
    -> plaintextfile_1.dat ... plaintextfile_7.dat
  nimshare -m 7 -k 4 -j -s \"2 4 5 7\" plaintextfile
    -> plaintextfile.out";

#[derive(Parser, Debug)]
#[command(
    name = "nimshare",
    version,
    about = "Split a file into threshold shares, or join shares back",
    after_help = EXAMPLES
)]
struct Cli {
    /// Number of shares (1-255)
    #[arg(short = 'm', value_name = "SHARES")]
    shares: u16,

    /// Shares required to join (1-m)
    #[arg(short = 'k', value_name = "THRESHOLD")]
    threshold: u16,

    /// Join shares instead of splitting
    #[arg(short = 'j')]
    join: bool,

    /// Share points to join, separated by spaces or commas
    #[arg(short = 's', value_name = "POINTS")]
    points: Option<String>,

    /// Secret file; shares are named <FILENAME>_<point>.dat
    filename: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Split,
    Join(Vec<u8>),
}

fn parse_points(list: &str) -> Result<BTreeSet<u16>> {
    list.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u16>()
                .with_context(|| format!("Invalid share point '{s}'"))
        })
        .collect()
}

/// Checks the arguments the way the tool always has, before touching files
fn validate(cli: &Cli) -> Result<Mode> {
    if !(1..=255).contains(&cli.shares) {
        bail!("Number of shares must be a number between 1 and 255");
    }
    if cli.threshold < 1 || cli.threshold > cli.shares {
        bail!("Threshold must be a number between 1 and the number of shares");
    }

    match (cli.join, &cli.points) {
        (false, None) => Ok(Mode::Split),
        (false, Some(_)) => bail!("List of shares invalid for split mode"),
        (true, None) => bail!("List of shares must be supplied for join mode"),
        (true, Some(list)) => {
            let points = parse_points(list)?;
            if let Some(&bad) = points.iter().find(|&&p| p == 0 || p > cli.shares) {
                bail!("Share {bad} is outside 1..={}", cli.shares);
            }
            if points.len() < cli.threshold as usize {
                bail!("Not enough shares specified");
            }
            Ok(Mode::Join(points.into_iter().map(|p| p as u8).collect()))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mode = validate(cli)?;
    let scheme = Scheme::new(cli.shares, cli.threshold)?;

    match mode {
        Mode::Split => {
            let written = operations::split_file(&cli.filename, &scheme)
                .with_context(|| format!("Failed to split {}", cli.filename.display()))?;
            for path in written {
                println!("{}", path.display());
            }
        }
        Mode::Join(points) => {
            let output = operations::join_file(&cli.filename, &scheme, &points)
                .with_context(|| format!("Failed to join shares of {}", cli.filename.display()))?;
            println!("{}", output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}\n");
            eprintln!("{EXAMPLES}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nimshare").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_split_mode() {
        let cli = parse(&["-m", "7", "-k", "4", "plaintextfile"]);
        assert_eq!(validate(&cli).unwrap(), Mode::Split);
        assert_eq!(cli.filename, PathBuf::from("plaintextfile"));
    }

    #[test]
    fn test_join_mode_points() {
        let cli = parse(&["-m", "7", "-k", "4", "-j", "-s", "7 2,5  4 2", "f"]);
        assert_eq!(validate(&cli).unwrap(), Mode::Join(vec![2, 4, 5, 7]));
    }

    #[test]
    fn test_range_checks() {
        assert!(validate(&parse(&["-m", "0", "-k", "1", "f"])).is_err());
        assert!(validate(&parse(&["-m", "256", "-k", "1", "f"])).is_err());
        assert!(validate(&parse(&["-m", "5", "-k", "0", "f"])).is_err());
        assert!(validate(&parse(&["-m", "5", "-k", "6", "f"])).is_err());
    }

    #[test]
    fn test_share_list_rules() {
        // shares are meaningless when splitting
        assert!(validate(&parse(&["-m", "5", "-k", "3", "-s", "1 2 3", "f"])).is_err());
        // and required when joining
        assert!(validate(&parse(&["-m", "5", "-k", "3", "-j", "f"])).is_err());
        // duplicates collapse below the threshold
        assert!(validate(&parse(&["-m", "5", "-k", "3", "-j", "-s", "1 1 2", "f"])).is_err());
        assert!(validate(&parse(&["-m", "5", "-k", "3", "-j", "-s", "1 2 6", "f"])).is_err());
        assert!(validate(&parse(&["-m", "5", "-k", "3", "-j", "-s", "0 1 2", "f"])).is_err());
        assert!(validate(&parse(&["-m", "5", "-k", "3", "-j", "-s", "1 x 2", "f"])).is_err());
    }

    #[test]
    fn test_missing_filename() {
        assert!(Cli::try_parse_from(["nimshare", "-m", "5", "-k", "3"]).is_err());
        assert!(Cli::try_parse_from(["nimshare", "-m", "5", "-k", "3", "a", "b"]).is_err());
    }
}

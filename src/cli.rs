/// CLI argument definitions for the `dpc` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(
    name = "dpc",
    version,
    about = "Cross-project duplicate code analysis and plagiarism clustering"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate duplication evidence into pairs and copying clusters
    #[command(long_about = "\
Aggregate per-file duplicate reports from the analysis server into
project-pair evidence and cluster the suspected copying cohorts.

Pipeline:
  1. Skip projects whose total duplicated lines do not exceed
     --total-dup-lines-filter (cheap pre-check).
  2. Per file, drop lines matched by --ignore-line-if-dups-more-than or
     more other files (shared boilerplate, not copying).
  3. Tally duplicated lines and contributing-file spread per project pair;
     evidence gathered from either side merges by maximum, never by sum.
  4. Drop pairs at or below --pair-min-num-lines, then min-max normalize
     the survivors to [0,1] edge weights.
  5. Report connected components of the pair graph as suspected clusters.

A project the server cannot answer for contributes no evidence and never
aborts the run.

Examples:
  dpc analyze                          # all projects under ./repos
  dpc analyze alice bob carol          # explicit project keys
  dpc analyze --csv dupresults.csv     # export the pair table
  dpc analyze --minimum-spread=-1      # disable the spread filter
  dpc analyze --json                   # machine-readable output")]
    Analyze {
        /// Project keys to analyze (default: subdirectories of --repos)
        projects: Vec<String>,

        /// Directory of cloned submissions used for project discovery
        #[arg(long, default_value = "repos")]
        repos: PathBuf,

        /// Analysis server base URL (default: from config, or localhost:9000)
        #[arg(long)]
        server: Option<String>,

        /// Config file (default: dupcluster.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Write the pair table as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Drop a line matched by this many distinct files or more (default: 3)
        #[arg(long)]
        ignore_line_if_dups_more_than: Option<usize>,

        /// Minimum distinct contributing files per pair; -1 disables (default: 2)
        #[arg(long, allow_hyphen_values = true)]
        minimum_spread: Option<i64>,

        /// Skip projects whose total duplicated lines are at or below this (default: 50)
        #[arg(long)]
        total_dup_lines_filter: Option<u64>,

        /// Drop pairs with this many duplicated lines or fewer (default: 50)
        #[arg(long)]
        pair_min_num_lines: Option<u64>,

        /// Number of concurrent fetch workers (default: one per CPU)
        #[arg(long)]
        jobs: Option<usize>,
    },

    /// Clone or update submission repositories keyed by submitter
    #[command(long_about = "\
Materialize every repository URL as a local working tree under --dest,
named after the submitter (the first path segment of the URL).

Idempotent: an existing clone of the same remote is kept; with --update it
is fast-forwarded. A directory pointing at a different remote is removed
and re-cloned. Failures are collected and reported at the end.

Examples:
  dpc clone urls.txt                     # one URL per line
  cat urls.txt | dpc clone               # same, from stdin
  dpc clone urls.txt --update            # pull new commits")]
    Clone {
        /// File with one repository URL per line (default: read stdin)
        file: Option<PathBuf>,

        /// Directory the working trees are created under
        #[arg(long, default_value = "repos")]
        dest: PathBuf,

        /// Fast-forward existing clones to the remote state
        #[arg(short, long)]
        update: bool,

        /// Number of concurrent clone workers
        #[arg(long, default_value = "10")]
        jobs: usize,
    },

    /// Submit every project directory to the analysis server
    #[command(long_about = "\
Run the external sonar-scanner binary over every project directory under
--repos, with cross-project duplicate detection enabled. Maven projects
are submitted with `mvn sonar:sonar` from their shallowest pom.xml.

A failing scan is reported and skipped; the remaining projects are still
submitted.

Examples:
  dpc scan                                   # generic scanner
  dpc scan --project-type maven              # Maven submissions
  dpc scan --scanner /opt/sonar-scanner/bin/sonar-scanner")]
    Scan {
        /// Directory of cloned submissions
        #[arg(long, default_value = "repos")]
        repos: PathBuf,

        /// Path to the sonar-scanner executable
        #[arg(long, default_value = "sonar-scanner")]
        scanner: String,

        /// Analysis server base URL (default: from config, or localhost:9000)
        #[arg(long)]
        server: Option<String>,

        /// Config file (default: dupcluster.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Project type: generic or maven
        #[arg(long, default_value = "generic", value_parser = ["generic", "maven"])]
        project_type: String,

        /// Analysis server login
        #[arg(long, default_value = "admin")]
        login: String,

        /// Analysis server password
        #[arg(long, default_value = "admin")]
        password: String,
    },
}

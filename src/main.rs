mod analyze;
mod cli;
mod clone;
mod config;
mod report_helpers;
mod scan;
mod sonar;
mod util;

use std::error::Error;

use clap::Parser;

use cli::{Cli, Commands};

fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Analyze {
            projects,
            repos,
            server,
            config,
            json,
            csv,
            ignore_line_if_dups_more_than,
            minimum_spread,
            total_dup_lines_filter,
            pair_min_num_lines,
            jobs,
        } => {
            let file = config::load(config.as_deref())?;
            let analysis = file.analysis.with_overrides(
                ignore_line_if_dups_more_than,
                minimum_spread,
                total_dup_lines_filter,
                pair_min_num_lines,
            );
            let server_url = server.unwrap_or(file.server.url);

            let projects = if projects.is_empty() {
                util::list_project_dirs(&repos)?
            } else {
                projects
            };

            analyze::run(
                &server_url,
                &projects,
                &analysis,
                jobs,
                json,
                csv.as_deref(),
            )
        }
        Commands::Clone {
            file,
            dest,
            update,
            jobs,
        } => {
            let urls = clone::read_urls(file.as_deref())?;
            clone::run(&urls, &dest, update, jobs)
        }
        Commands::Scan {
            repos,
            scanner,
            server,
            config,
            project_type,
            login,
            password,
        } => {
            let file = config::load(config.as_deref())?;
            let server_url = server.unwrap_or(file.server.url);
            let project_type = scan::ProjectType::parse(&project_type)?;
            scan::run(
                &repos,
                &scanner,
                &server_url,
                &login,
                &password,
                project_type,
            )
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = dispatch(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

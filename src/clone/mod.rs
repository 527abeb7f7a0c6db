//! Repository acquisition: materialize every submitted repository URL as a
//! local working tree keyed by submitter identity.
//!
//! Idempotent: an existing clone for the same remote is left alone (or
//! fast-forwarded with `--update`); a directory left over from a different
//! remote is removed and re-cloned. One failing repository never stops the
//! others; failures are collected and reported at the end.

use std::error::Error;
use std::io::BufRead;
use std::path::Path;

use git2::Repository;
use git2::build::CheckoutBuilder;
use rayon::prelude::*;

/// Derive the submitter name (the directory key) from a repository URL:
/// the first path segment after the host, e.g.
/// `https://github.com/alice/hw3` → `alice`.
pub fn submitter_from_url(url: &str) -> Result<String, Box<dyn Error>> {
    let rest = url
        .split_once("//")
        .map(|(_, rest)| rest)
        .ok_or_else(|| format!("invalid repository url: {url}"))?;

    let mut segments = rest.split('/').skip(1).filter(|s| !s.is_empty());
    match segments.next() {
        Some(name) => Ok(name.to_string()),
        None => Err(format!("repository url has no owner segment: {url}").into()),
    }
}

fn remote_matches(repo: &Repository, url: &str) -> bool {
    repo.find_remote("origin")
        .ok()
        .and_then(|r| r.url().map(|u| u == url))
        .unwrap_or(false)
}

/// Fast-forward the current branch to the remote's state. Local commits make
/// the clone diverge; that is an error the submitter has to resolve, not
/// something to merge silently.
fn fast_forward(repo: &Repository) -> Result<(), Box<dyn Error>> {
    let mut remote = repo.find_remote("origin")?;
    remote.fetch(&[] as &[&str], None, None)?;

    let fetch_head = repo.find_reference("FETCH_HEAD")?;
    let target = repo.reference_to_annotated_commit(&fetch_head)?;
    let (analysis, _) = repo.merge_analysis(&[&target])?;

    if analysis.is_up_to_date() {
        return Ok(());
    }
    if !analysis.is_fast_forward() {
        return Err("local commits present, cannot fast-forward".into());
    }

    let head = repo.head()?;
    let refname = head
        .name()
        .ok_or("HEAD is not a valid utf-8 reference")?
        .to_string();
    let mut reference = repo.find_reference(&refname)?;
    reference.set_target(target.id(), "fast-forward")?;
    repo.set_head(&refname)?;
    repo.checkout_head(Some(CheckoutBuilder::default().force()))?;
    Ok(())
}

/// Clone `url` into `dest`, reusing an existing clone of the same remote.
pub fn clone_or_update(url: &str, dest: &Path, update: bool) -> Result<(), Box<dyn Error>> {
    if dest.exists() {
        if let Ok(repo) = Repository::open(dest)
            && remote_matches(&repo, url)
        {
            if update {
                fast_forward(&repo)?;
            }
            return Ok(());
        }
        // stale checkout or a different submitter's remote
        std::fs::remove_dir_all(dest)?;
    }

    Repository::clone(url, dest)?;
    Ok(())
}

/// Read repository URLs, one per line, from `file` or stdin. Blank lines are
/// skipped.
pub fn read_urls(file: Option<&Path>) -> Result<Vec<String>, Box<dyn Error>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read url list {}: {e}", path.display()))?,
        None => {
            let mut lines = String::new();
            for line in std::io::stdin().lock().lines() {
                lines.push_str(&line?);
                lines.push('\n');
            }
            lines
        }
    };

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Entry point for the `clone` subcommand: clone every URL concurrently into
/// `dest_root/<submitter>` and report the repositories that failed.
pub fn run(
    urls: &[String],
    dest_root: &Path,
    update: bool,
    jobs: usize,
) -> Result<(), Box<dyn Error>> {
    if jobs == 0 {
        return Err("--jobs must be at least 1".into());
    }
    std::fs::create_dir_all(dest_root)?;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let failed: Vec<&String> = pool.install(|| {
        urls.par_iter()
            .filter_map(|url| {
                let name = match submitter_from_url(url) {
                    Ok(n) => n,
                    Err(err) => {
                        eprintln!("warning: {err}");
                        return Some(url);
                    }
                };
                println!("{name}");
                match clone_or_update(url, &dest_root.join(&name), update) {
                    Ok(()) => None,
                    Err(err) => {
                        eprintln!("warning: {name}: {err}");
                        Some(url)
                    }
                }
            })
            .collect()
    });

    if !failed.is_empty() {
        println!("{}", "-".repeat(80));
        println!(
            "cloning failed for {} repositories, check permissions and urls and try again:",
            failed.len()
        );
        for url in failed {
            println!("  {url}");
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

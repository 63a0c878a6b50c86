//! Runs the checks that CI runs on the hexfield workspace.
//!
//! Pass the name of a single check to run only that one, or nothing to run them all.
//! Every selected check runs even if an earlier one fails,
//! and the process exits with an error if any of them did.
//!
//! Local results can differ from CI, which always uses the latest stable toolchain.

use std::process;

use anyhow::{bail, Context};
use hashbrown::HashSet;
use hexfield_lib::enum_iter::IterableEnum;
use hexfield_macros::IterableEnum;
use itertools::Itertools;
use xshell::{cmd, Shell};

mod manifests;

/// The checks that can be run in CI, in the order they are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IterableEnum)]
enum Check {
    Format,
    Clippy,
    Test,
    DocTest,
    DocCheck,
    Manifests,
}

impl Check {
    /// The command line argument that selects this check.
    fn argument(&self) -> &'static str {
        match self {
            Check::Format => "format",
            Check::Clippy => "clippy",
            Check::Test => "test",
            Check::DocTest => "doctest",
            Check::DocCheck => "doccheck",
            Check::Manifests => "manifests",
        }
    }

    /// The check selected by `argument`, if any.
    fn from_argument(argument: &str) -> Option<Check> {
        Check::variants().find(|check| check.argument() == argument)
    }

    /// What to do when this check fails.
    fn advice(&self) -> &'static str {
        match self {
            Check::Format => "run 'cargo fmt --all' to format your code",
            Check::Clippy => "fix the clippy lints reported above",
            Check::Test => "fix the failing tests reported above",
            Check::DocTest => "fix the failing doc tests reported above",
            Check::DocCheck => "fix the documentation warnings reported above",
            Check::Manifests => "fix the bundled manifests in hexfield_lib/assets/manifests",
        }
    }

    /// Runs this check in `sh`.
    fn run(&self, sh: &Shell) -> anyhow::Result<()> {
        let command = match self {
            Check::Format => cmd!(sh, "cargo fmt --all -- --check"),
            Check::Clippy => {
                cmd!(sh, "cargo clippy --workspace --all-targets -- {CLIPPY_FLAGS...}")
            }
            // Benches are built but not run, so that they stay in sync with the library
            Check::Test => cmd!(sh, "cargo test --workspace --lib --bins --tests --benches"),
            Check::DocTest => cmd!(sh, "cargo test --workspace --doc"),
            Check::DocCheck => {
                cmd!(sh, "cargo doc --workspace --no-deps --document-private-items")
                    .env("RUSTDOCFLAGS", "-D warnings")
            }
            Check::Manifests => return manifests::verify_manifests_load(),
        };

        command.run()?;
        Ok(())
    }
}

/// Lints applied on top of the ones configured in the crates themselves.
const CLIPPY_FLAGS: [&str; 3] = [
    "-Aclippy::type_complexity",
    "-Wclippy::doc_markdown",
    "-Dwarnings",
];

/// Parses the command line into the set of checks to run.
fn selected_checks(argument: Option<&str>) -> anyhow::Result<HashSet<Check>> {
    let Some(argument) = argument else {
        return Ok(Check::variants().collect());
    };

    match Check::from_argument(argument) {
        Some(check) => Ok([check].into_iter().collect()),
        None => bail!(
            "Invalid argument: {argument}.\nEnter one of: {}.",
            Check::variants().map(|check| check.argument()).join(", ")
        ),
    }
}

fn run_checks(argument: Option<&str>) -> anyhow::Result<()> {
    let selected = selected_checks(argument)?;
    let sh = Shell::new().context("could not open a shell")?;

    let mut failed = Vec::new();
    for check in Check::variants().filter(|check| selected.contains(check)) {
        println!("Running the {} check", check.argument());
        if let Err(error) = check.run(&sh) {
            println!("The {} check failed: {error:?}", check.argument());
            failed.push(check);
        }
    }

    if failed.is_empty() {
        return Ok(());
    }

    let advice = failed
        .iter()
        .map(|check| format!("  {}: {}", check.argument(), check.advice()))
        .join("\n");
    bail!("{} checks failed:\n{advice}", failed.len())
}

fn main() {
    let argument = std::env::args().nth(1);

    if let Err(error) = run_checks(argument.as_deref()) {
        eprintln!("{error}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_name_checks() {
        for check in Check::variants() {
            assert_eq!(Check::from_argument(check.argument()), Some(check));
        }
        assert_eq!(Check::from_argument("invalid"), None);
    }

    #[test]
    fn no_argument_selects_everything() {
        let everything = selected_checks(None).unwrap();
        assert_eq!(everything.len(), Check::N_VARIANTS);

        let single = selected_checks(Some("manifests")).unwrap();
        assert_eq!(single.len(), 1);
        assert!(single.contains(&Check::Manifests));

        assert!(selected_checks(Some("lint")).is_err());
    }
}

use anyhow::Context;
use anyhow::Result;
use clap::Command;
use clap::arg;
use version::SemVersion;
use version_compare::LooseVersion;

pub fn args() -> Command {
    Command::new("sort")
        .about("Sort versions")
        .long_about("Take a list of versions, sort and print them in descending order. Versions of equal precedence are printed once.")
        .arg(arg!(versions: <version>... "Versions to sort"))
        .arg(arg!(--loose "Sort without a grammar, part by part"))
        .arg(arg!(--"skip-invalid" "Skip versions that are not semver"))
        .arg(arg!(--ascending "output in ascending order")
            .overrides_with("descending")
        )
        .arg(arg!(--descending "output in descending order (default)")
            .overrides_with("ascending")
        )
}

/// Sort ascending by semver precedence. Returns the sorted versions and the
/// inputs that failed to parse.
pub(crate) fn sort_semver(versions: &[&str]) -> (Vec<String>, Vec<String>) {

    let mut invalid = Vec::new();
    let mut parsed = Vec::new();
    for v in versions {
        match SemVersion::parse(v) {
            Ok(sv) => parsed.push((sv, v.to_string())),
            Err(e) => {
                tracing::debug!("{v}: {e}");
                invalid.push(v.to_string());
            }
        }
    }

    parsed.sort_by(|a, b| version::compare(&a.0, &b.0));
    parsed.dedup_by(|a, b| version::compare(&a.0, &b.0).is_eq());

    (parsed.into_iter().map(|(_, s)| s).collect(), invalid)
}

pub(crate) fn sort_loose(versions: &[&str]) -> Vec<String> {
    let mut versions: Vec<_> = versions.iter().map(|v| LooseVersion::from(*v)).collect();
    versions.sort();
    versions.dedup();
    versions.into_iter().map(|v| v.0).collect()
}

pub fn main(matches: &clap::ArgMatches) -> Result<()> {

    let versions: Vec<&str> = matches
        .get_many::<String>("versions")
        .context("version expected")?
        .map(String::as_str)
        .collect();
    let loose = matches.get_flag("loose");
    let skip_invalid = matches.get_flag("skip-invalid");
    let descending = !matches.get_flag("ascending");

    let mut sorted = if loose {
        sort_loose(&versions)
    } else {
        let (sorted, invalid) = sort_semver(&versions);
        if !skip_invalid && !invalid.is_empty() {
            for v in &invalid {
                eprintln!("error: version is not semver: {v}");
            }
            anyhow::bail!("{} invalid version(s)", invalid.len());
        }
        sorted
    };

    if descending {
        sorted.reverse();
    }

    for v in sorted {
        println!("{v}");
    }

    Ok(())
}

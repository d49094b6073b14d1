use anyhow::Context;
use anyhow::Result;
use clap::Command;
use clap::arg;
use std::cmp::Ordering;

pub fn args() -> Command {
    Command::new("compare")
        .about("Compare two versions")
        .long_about("Compare two versions by semver precedence (build metadata is ignored), or part by part with --loose")
        .visible_alias("cmp")
        .arg(arg!(left: <left> "First version"))
        .arg(arg!(right: <right> "Second version"))
        .arg(arg!(--loose "Compare without a grammar, part by part"))
}

fn symbol(ord: Ordering) -> char {
    match ord {
        Ordering::Less => '<',
        Ordering::Equal => '=',
        Ordering::Greater => '>',
    }
}

pub(crate) fn compare(left: &str, right: &str, loose: bool) -> Result<Ordering> {
    if loose {
        return Ok(version_compare::compare(left, right));
    }
    Ok(version::compare_strings(left, right)?)
}

pub fn main(matches: &clap::ArgMatches) -> Result<()> {

    let left = matches.get_one::<String>("left").context("left version expected")?;
    let right = matches.get_one::<String>("right").context("right version expected")?;
    let loose = matches.get_flag("loose");

    let ord = compare(left, right, loose)?;
    tracing::debug!(loose, "{left} {:?} {right}", ord);

    println!("{left} {} {right}", symbol(ord));
    Ok(())
}

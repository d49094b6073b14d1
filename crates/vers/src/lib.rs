use anyhow::Context;
use anyhow::Result;
use clap::Command;
use clap::arg;
use field_route::FieldTable;
use std::path::PathBuf;

mod compare;
mod grammar;
mod parse;
mod sort;

pub fn get_cli() -> Command {
    build_cli(Command::new("vers"))
}

pub fn build_cli(cmd: clap::Command) -> clap::Command {
    cmd.version(clap::crate_version!())
        .about("Parse, compare and sort version strings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(parse::args())
        .subcommand(compare::args())
        .subcommand(sort::args())
        .subcommand(grammar::args())
}

pub fn main_cli(matches: &clap::ArgMatches) -> Result<()> {

    match matches.subcommand() {

        Some(("parse", matches)) => {
            return parse::main(matches);
        }

        Some(("compare", matches)) => {
            return compare::main(matches);
        }

        Some(("sort", matches)) => {
            return sort::main(matches);
        }

        Some(("grammar", matches)) => {
            return grammar::main(matches);
        }

        _ =>  {
            anyhow::bail!("no subcmd");
        }
    }
}

/// `--grammar <FILE>`, shared by the subcommands that accept a grammar file
fn grammar_arg() -> clap::Arg {
    arg!(--grammar <FILE> "Grammar file describing the version fields (default: semver)")
        .env("VERS_GRAMMAR")
        .value_parser(clap::value_parser!(PathBuf))
}

/// the table from `--grammar`, if one was given
fn load_grammar(matches: &clap::ArgMatches) -> Result<Option<FieldTable>> {
    let Some(path) = matches.get_one::<PathBuf>("grammar") else {
        return Ok(None);
    };
    let table = FieldTable::load(path)
        .with_context(|| format!("failed to load grammar {}", path.display()))?;
    tracing::debug!(fields = table.len(), "using grammar from {}", path.display());
    Ok(Some(table))
}

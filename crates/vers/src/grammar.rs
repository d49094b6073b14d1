use anyhow::Result;
use clap::Command;
use version::SemVersion;

pub fn args() -> Command {
    Command::new("grammar")
        .about("Check a grammar file and print it")
        .long_about("Validate the grammar given by --grammar and print it back as toml. Without --grammar the built-in semver grammar is printed, a starting point for new grammars.")
        .arg(crate::grammar_arg())
}

pub fn main(matches: &clap::ArgMatches) -> Result<()> {

    let text = match crate::load_grammar(matches)? {
        Some(table) => table.to_toml()?,
        None => SemVersion::fields().to_toml()?,
    };

    print!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_route::FieldTable;

    #[test]
    fn semver_grammar_round_trips() {
        let text = SemVersion::fields().to_toml().unwrap();
        assert!(text.contains("name = \"prerelease\""));
        let table = FieldTable::from_toml(&text).unwrap();
        assert_eq!(&table, SemVersion::fields());
    }
}

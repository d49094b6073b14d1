use anyhow::Context;
use anyhow::Result;
use clap::Command;
use clap::arg;
use field_route::{DynamicRecord, FieldTable};
use std::io::Write;
use version::SemVersion;

pub fn args() -> Command {
    Command::new("parse")
        .about("Parse versions into their fields")
        .long_about("Parse each version with the semver grammar, or with the grammar given by --grammar, and print the fields")
        .arg(arg!(versions: <version>... "Versions to parse"))
        .arg(crate::grammar_arg())
        .arg(arg!(--json "Print one json object per version"))
}

/// (field name, rendered value) rows for a semver version
fn semver_rows(v: &SemVersion) -> Vec<(&'static str, String)> {
    vec![
        ("major", v.major.to_string()),
        ("minor", v.minor.to_string()),
        ("patch", v.patch.to_string()),
        ("prerelease", v.prerelease.clone()),
        ("build", v.build.clone()),
    ]
}

fn semver_json(v: &SemVersion) -> serde_json::Value {
    serde_json::json!({
        "major": v.major,
        "minor": v.minor,
        "patch": v.patch,
        "prerelease": v.prerelease,
        "build": v.build,
    })
}

fn parse_with(table: &FieldTable, input: &str) -> Result<DynamicRecord> {
    let mut record = DynamicRecord::for_table(table);
    field_route::parse(table, &mut record, input)
        .with_context(|| format!("invalid version {input:?}"))?;
    Ok(record)
}

pub fn main(matches: &clap::ArgMatches) -> Result<()> {

    let versions = matches.get_many::<String>("versions").context("version expected")?;
    let json = matches.get_flag("json");
    let table = crate::load_grammar(matches)?;

    let mut tw = tabwriter::TabWriter::new(std::io::stdout());

    for v in versions {
        tracing::trace!(version = v.as_str(), "parse");

        match &table {
            Some(table) => {
                let record = parse_with(table, v)?;
                if json {
                    writeln!(&mut tw, "{}", serde_json::to_string(&record)?)?;
                    continue;
                }
                writeln!(&mut tw, "{v}")?;
                for (name, value) in record.iter() {
                    match value {
                        Some(value) => writeln!(&mut tw, "  {name}\t{value}")?,
                        None => writeln!(&mut tw, "  {name}\t-")?,
                    }
                }
            }
            None => {
                let sv = SemVersion::parse(v).with_context(|| format!("invalid version {v:?}"))?;
                if json {
                    writeln!(&mut tw, "{}", semver_json(&sv))?;
                    continue;
                }
                writeln!(&mut tw, "{v}")?;
                for (name, value) in semver_rows(&sv) {
                    writeln!(&mut tw, "  {name}\t{value}")?;
                }
            }
        }
    }

    tw.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows() {
        let sv = SemVersion::parse("2.3.19-pre.release+build").unwrap();
        let rows = semver_rows(&sv);
        assert_eq!(rows[2], ("patch", "19".to_string()));
        assert_eq!(rows[3], ("prerelease", "pre.release".to_string()));
        assert_eq!(rows[4], ("build", "build".to_string()));
    }

    #[test]
    fn json() {
        let sv = SemVersion::parse("2.3.19+build.1").unwrap();
        assert_eq!(
            semver_json(&sv).to_string(),
            r#"{"build":"build.1","major":2,"minor":3,"patch":19,"prerelease":""}"#
        );
    }

    #[test]
    fn with_table() {
        let record = parse_with(SemVersion::fields(), "1.2.3-rc.1").unwrap();
        assert_eq!(record.by_name("prerelease").unwrap().to_string(), "rc.1");
        assert!(record.by_name("build").is_none());

        let err = parse_with(SemVersion::fields(), "1.2.x").unwrap_err();
        assert_eq!(err.to_string(), "invalid version \"1.2.x\"");
    }
}

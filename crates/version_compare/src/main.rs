use version_compare::*;

fn main() {

    let mut versions : Vec<_> = std::env::args().skip(1).map(LooseVersion).collect();

    versions.sort();
    versions.dedup();

    for v in versions {
        println!("{}", v.as_str());
    }
}

use color_eyre::Result;

use gazetteer::{export, roster::Roster};

pub struct Options {
    pub json: bool,
}

pub fn command(options: Options) -> Result<()> {
    let roster = Roster::seeded();

    if options.json {
        let entries = export::entries_json(roster.entries());
        println!("{}", serde_json::to_string(&entries)?);
        return Ok(());
    }

    let width = roster
        .entries()
        .iter()
        .map(|entry| entry.state.len())
        .max()
        .unwrap_or(0);
    for entry in roster.entries() {
        let city = if entry.has_city() {
            entry.city.as_str()
        } else {
            "N/A"
        };
        println!("{:width$}  {}", entry.state, city);
    }
    Ok(())
}

use colored::Colorize;
use dg_oracle::{
    PROPHECY_REVEAL_DELAY, ProphecyCatalog, ProphecyHistory, ProphecySubject, generate_prophecy,
};

use crate::config::CliConfig;

pub fn run(config: &CliConfig, sheet: Option<&str>) -> Result<(), String> {
    let session = super::open_session(config, sheet)?;
    let subject = ProphecySubject::from_sheet(session.sheet());
    let history: ProphecyHistory = super::load_state(config, super::PROPHECY_HISTORY_KEY)?;

    let mut rng = config.rng();
    let catalog = ProphecyCatalog::standard();
    let (prophecy, history) =
        generate_prophecy(&mut rng, &catalog, &subject, &history).map_err(|e| e.to_string())?;

    super::reveal_after(
        config,
        PROPHECY_REVEAL_DELAY,
        "The sacred vapours rise. The Pythia consults the gods...",
    )?;

    println!("  \"{}\"", prophecy.text.italic());
    println!("  {}", "Priestess of Apollo, Oracle of Delphi".dimmed());

    super::store_state(config, super::PROPHECY_HISTORY_KEY, &history)
}

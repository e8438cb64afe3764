use colored::Colorize;
use dg_core::NameKind;
use dg_oracle::generate_names;

use crate::config::CliConfig;

/// Draw names; with `apply`, write one of them into the sheet.
pub fn run(config: &CliConfig, sheet: Option<&str>, apply: Option<&str>) -> Result<(), String> {
    let mut rng = config.rng();
    let names = generate_names(&mut rng);

    println!("  hero: {}", names.hero.bold());
    println!("  god:  {}", names.god.bold());

    let Some(target) = apply else {
        return Ok(());
    };
    let kind = match target.trim().to_lowercase().as_str() {
        "hero" | "character" => NameKind::Character,
        "god" => NameKind::God,
        other => {
            return Err(format!(
                "cannot apply a name to \"{other}\". Use: character, god"
            ));
        }
    };

    let mut session = super::open_session(config, sheet)?;
    names.apply(session.sheet_mut(), kind);
    super::save_session(&mut session)?;
    println!(
        "  {} \"{}\" to {}",
        "Applied".green(),
        names.get(kind),
        session.current_name().unwrap_or_default()
    );
    Ok(())
}

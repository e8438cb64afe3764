use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dg_core::transfer::export_json;
use dg_core::{Attribute, AttributeGroup, CharacterSheet, Transformation};

use crate::config::CliConfig;

pub fn run(config: &CliConfig, sheet: Option<&str>, json: bool) -> Result<(), String> {
    let session = super::open_session(config, sheet)?;
    let sheet = session.sheet();

    if json {
        println!("{}", export_json(sheet).map_err(|e| e.to_string())?);
        return Ok(());
    }

    let name = session.current_name().unwrap_or_default();
    print_identity(name, sheet);
    print_attributes(sheet);
    print_powers(sheet);
    print_transformation(sheet);
    print_notes(sheet);
    Ok(())
}

fn print_identity(name: &str, sheet: &CharacterSheet) {
    println!(
        "  {} [{}]",
        super::display_name(&sheet.character_name).bold(),
        name.dimmed()
    );
    println!();
    println!("  divine parent: {}", super::display_name(&sheet.god_name));
    if let Some(patron) = sheet.patron() {
        println!("  patron:        {patron}");
    }
    println!("  age:           {}", sheet.age);
    if !sheet.social_group.is_empty() {
        println!("  group:         {}", sheet.social_group);
    }
    if !sheet.nationality.is_empty() {
        println!("  nationality:   {}", sheet.nationality);
    }
    println!("  connection:    {}%", sheet.connection_level);
    println!(
        "  health:        {} ({})",
        sheet.health,
        sheet.health_condition()
    );
    println!(
        "  sanity:        {} ({})",
        sheet.sanity,
        sheet.sanity_condition()
    );
    println!();
}

fn print_attributes(sheet: &CharacterSheet) {
    for group in [AttributeGroup::Primary, AttributeGroup::Skill] {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![group.to_string(), "Value".into(), "Bonus".into()]);
        for attribute in Attribute::in_group(group) {
            table.add_row(vec![
                attribute.label().to_string(),
                sheet.get(attribute).to_string(),
                format!("{:+}", sheet.bonus(attribute)),
            ]);
        }
        println!("{table}");
    }
    println!();
}

fn print_powers(sheet: &CharacterSheet) {
    if sheet.divine_powers.is_empty() {
        return;
    }
    println!("  {}", "Divine Powers".bold());
    for power in &sheet.divine_powers {
        println!("  {power}");
        let mut details = Vec::new();
        if !power.power_type.is_empty() {
            details.push(format!("type {}", power.power_type));
        }
        if power.cost != 0 {
            details.push(format!("cost {}", power.cost));
        }
        if power.deals_damage() {
            details.push(format!("damage {}", power.damage));
        }
        if !details.is_empty() {
            println!("    {}", details.join(" | ").dimmed());
        }
        if !power.description.is_empty() {
            println!("    {}", power.description);
        }
    }
    println!();
}

fn print_transformation(sheet: &CharacterSheet) {
    let t = Transformation::of(sheet);
    let label = format!("{}% {}", t.level, t.stage);
    if t.is_transformed() {
        println!("  transformation: {}", label.yellow().bold());
    } else {
        println!("  transformation: {label}");
    }
}

fn print_notes(sheet: &CharacterSheet) {
    let notes = [
        ("appearance", &sheet.appearance),
        ("history", &sheet.personal_history),
        ("allies", &sheet.allies_and_friends),
        ("domains", &sheet.domains),
        ("equipment", &sheet.equipment),
        ("abilities", &sheet.abilities),
        ("observations", &sheet.observations),
    ];
    let present: Vec<_> = notes.iter().filter(|(_, text)| !text.is_empty()).collect();
    if present.is_empty() {
        return;
    }
    println!();
    for (label, text) in present {
        println!("  {}", label.dimmed());
        for line in text.lines() {
            println!("    {}", line.trim());
        }
    }
}

//! Integration tests for dg-cli commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `demigod` command using `dir` for storage and a fixed seed.
fn demigod(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("demigod").unwrap();
    cmd.env("DEMIGOD_DATA_DIR", dir.join("data"))
        .env("DEMIGOD_SEED", "42")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(dir);
    cmd
}

/// A temp directory with one saved sheet called `percy`.
fn with_sheet() -> TempDir {
    let dir = TempDir::new().unwrap();
    demigod(dir.path())
        .args(["new", "percy", "--character", "Perseus", "--patron", "poseidon"])
        .assert()
        .success();
    dir
}

// -- gods --

#[test]
fn gods_lists_patrons() {
    let dir = TempDir::new().unwrap();
    demigod(dir.path())
        .arg("gods")
        .assert()
        .success()
        .stdout(predicate::str::contains("Helios"))
        .stdout(predicate::str::contains("Goddess of Magic"));
}

// -- new / list / delete --

#[test]
fn new_then_list() {
    let dir = with_sheet();
    demigod(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("percy *"))
        .stdout(predicate::str::contains("Perseus"))
        .stdout(predicate::str::contains("Poseidon"));
    assert!(dir.path().join("data/divine_sheet_percy.json").exists());
}

#[test]
fn new_refuses_to_overwrite() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["new", "percy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    demigod(dir.path())
        .args(["new", "percy", "--force"])
        .assert()
        .success();
}

#[test]
fn new_rejects_unknown_patron() {
    let dir = TempDir::new().unwrap();
    demigod(dir.path())
        .args(["new", "x", "--patron", "zeus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown patron"));
}

#[test]
fn list_empty() {
    let dir = TempDir::new().unwrap();
    demigod(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved sheets"));
}

#[test]
fn delete_sheet() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["delete", "percy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));
    demigod(dir.path())
        .args(["delete", "percy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sheet not found"));
    // the last-opened pointer went with it
    demigod(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no sheet selected"));
}

// -- show / set --

#[test]
fn show_without_any_sheet_fails() {
    let dir = TempDir::new().unwrap();
    demigod(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no sheet selected"));
}

#[test]
fn show_missing_sheet_fails() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["show", "--sheet", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sheet not found"));
}

#[test]
fn set_attribute_is_saved_and_clamped() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["set", "strength", "47"])
        .assert()
        .success()
        .stdout(predicate::str::contains("47 (+9)"));
    demigod(dir.path())
        .args(["set", "dodge", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100 (+20)"));
    demigod(dir.path())
        .args(["set", "dodge", "-30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("70 (+14)"));
    demigod(dir.path())
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"strength\": 47"))
        .stdout(predicate::str::contains("\"dodge\": 70"));
}

#[test]
fn set_unknown_attribute_suggests() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["set", "strenght", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean strength"));
}

#[test]
fn show_prints_sheet() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["set", "magic", "40"])
        .assert()
        .success();
    demigod(dir.path())
        .args(["show", "--sheet", "percy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Perseus"))
        .stdout(predicate::str::contains("God of the Seas"))
        .stdout(predicate::str::contains("Magic"))
        .stdout(predicate::str::contains("+8"))
        .stdout(predicate::str::contains("19% Mortal"));
}

// -- powers --

#[test]
fn power_lifecycle() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["power", "add", "--name", "Tidal Surge", "--damage", "2d6 + 5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("power_1"));
    demigod(dir.path())
        .args(["power", "set", "power_1", "--cost", "10"])
        .assert()
        .success();
    demigod(dir.path())
        .args(["power", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tidal Surge"))
        .stdout(predicate::str::contains("10"));
    demigod(dir.path())
        .args(["roll", "--power", "power_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tidal Surge"))
        .stdout(predicate::str::contains("2d6+5"));
    demigod(dir.path())
        .args(["power", "remove", "power_1"])
        .assert()
        .success();
    demigod(dir.path())
        .args(["power", "remove", "power_1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("divine power not found"));
}

#[test]
fn power_with_bad_damage_is_rejected() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["power", "add", "--damage", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dice expression"));
}

// -- roll --

#[test]
fn roll_expression() {
    let dir = TempDir::new().unwrap();
    demigod(dir.path())
        .args(["roll", "2d6+3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2d6+3"))
        .stdout(predicate::str::contains(" + 3 = "));
}

#[test]
fn roll_same_seed_same_result() {
    let dir = TempDir::new().unwrap();
    let first = demigod(dir.path()).args(["roll", "4d20"]).output().unwrap();
    let second = demigod(dir.path()).args(["roll", "4d20"]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn roll_rejects_malformed_expression() {
    let dir = TempDir::new().unwrap();
    demigod(dir.path())
        .args(["roll", "2d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dice expression"));
    demigod(dir.path())
        .args(["roll", "0d6"])
        .assert()
        .failure();
}

#[test]
fn roll_quick_preset() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["set", "strength", "50"])
        .assert()
        .success();
    demigod(dir.path())
        .args(["roll", "--quick", "strength"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Strength test"))
        .stdout(predicate::str::contains("1d20+10"));
    demigod(dir.path())
        .args(["roll", "--quick", "wisdom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown quick roll"));
}

#[test]
fn roll_presets_and_history() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["roll", "--presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Magic power"))
        .stdout(predicate::str::contains("2d8"));

    for expr in ["d4", "d6", "d8", "d10", "d12", "d20"] {
        demigod(dir.path()).args(["roll", expr]).assert().success();
    }
    demigod(dir.path())
        .args(["roll", "--history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1d20"))
        .stdout(predicate::str::contains("1d6"))
        .stdout(predicate::str::contains("1d4").not());
}

// -- combat --

#[test]
fn attack_reports_outcome() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["set", "melee weapons", "100"])
        .assert()
        .success();
    // +20 on the d20 always meets difficulty 5
    demigod(dir.path())
        .args(["attack", "melee", "--difficulty", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("attack:"))
        .stdout(predicate::str::contains("damage:"));
}

#[test]
fn attack_validates_input() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["attack", "trident"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown weapon"));
    demigod(dir.path())
        .args(["attack", "magic", "--difficulty", "31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 30"));
}

#[test]
fn defend_combines_modifiers() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["set", "dodge", "50"])
        .assert()
        .success();
    demigod(dir.path())
        .args(["set", "agility", "40"])
        .assert()
        .success();
    demigod(dir.path())
        .arg("defend")
        .assert()
        .success()
        .stdout(predicate::str::contains("dodge 10 + agility 4"));
}

// -- oracle --

#[test]
fn prophecy_is_spoken_and_remembered() {
    let dir = with_sheet();
    demigod(dir.path())
        .arg("prophecy")
        .assert()
        .success()
        .stdout(predicate::str::contains("Oracle of Delphi"))
        .stdout(predicate::str::contains("{").not());
    let history = fs::read_to_string(dir.path().join("data/oracle_history.json")).unwrap();
    let used: Vec<usize> = serde_json::from_str(&history).unwrap();
    assert_eq!(used.len(), 1);
}

#[test]
fn names_apply_to_sheet() {
    let dir = with_sheet();
    let output = demigod(dir.path())
        .args(["names", "--apply", "god"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Applied"));
    let god = stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("god:"))
        .unwrap()
        .trim()
        .to_string();

    demigod(dir.path())
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("\"godName\": \"{god}\"")));
    demigod(dir.path())
        .args(["names", "--apply", "pet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot apply a name"));
}

#[test]
fn transformation_progress() {
    let dir = with_sheet();
    demigod(dir.path())
        .arg("transformation")
        .assert()
        .success()
        .stdout(predicate::str::contains("15% Mortal"))
        .stdout(predicate::str::contains("25 points to the next stage"));
    demigod(dir.path())
        .args(["set", "connection", "85"])
        .assert()
        .success();
    demigod(dir.path())
        .arg("transformation")
        .assert()
        .success()
        .stdout(predicate::str::contains("Divine Ascension"))
        .stdout(predicate::str::contains("Semi-divine form"));
}

// -- export / import --

#[test]
fn export_then_import_round_trips() {
    let dir = with_sheet();
    demigod(dir.path())
        .args(["set", "intelligence", "66"])
        .assert()
        .success();
    demigod(dir.path())
        .args(["export", "--file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("percy.json"));

    let exported = dir.path().join("percy.json");
    let copy = dir.path().join("twin.json");
    fs::copy(&exported, &copy).unwrap();
    demigod(dir.path())
        .arg("import")
        .arg(&copy)
        .assert()
        .success()
        .stdout(predicate::str::contains("twin"));

    let original = demigod(dir.path())
        .args(["show", "--json", "--sheet", "percy"])
        .output()
        .unwrap();
    let twin = demigod(dir.path())
        .args(["show", "--json", "--sheet", "twin"])
        .output()
        .unwrap();
    assert_eq!(original.stdout, twin.stdout);
}

#[test]
fn import_overlays_existing_sheet() {
    let dir = with_sheet();
    let patch = dir.path().join("patch.json");
    fs::write(&patch, r#"{"characterName": "Andromeda", "charisma": 70}"#).unwrap();
    demigod(dir.path())
        .arg("import")
        .arg(&patch)
        .args(["--as", "percy"])
        .assert()
        .success();
    demigod(dir.path())
        .args(["show", "--json", "--sheet", "percy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"characterName\": \"Andromeda\""))
        .stdout(predicate::str::contains("\"charisma\": 70"))
        .stdout(predicate::str::contains("\"selectedGod\": \"poseidon\""));
}

#[test]
fn import_malformed_json_changes_nothing() {
    let dir = with_sheet();
    let bad = dir.path().join("broken.json");
    fs::write(&bad, "{ not json").unwrap();
    demigod(dir.path())
        .arg("import")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("import failed"));
    assert!(!dir.path().join("data/divine_sheet_broken.json").exists());
}

#[test]
fn export_to_stdout() {
    let dir = with_sheet();
    demigod(dir.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"characterName\": \"Perseus\""))
        .stdout(predicate::str::contains("savedAt").not());
}

//! End-to-end compilation of a codex into a registry.

use std::{path::Path, process::Command};

use codex_registry::{Registry, Suit, compile, domain::validate};
use serde_json::Value;
use tempfile::TempDir;

const CODEX: &str = "# Codex Abyssiae

Preamble text that belongs to no card.

## The Fool
- App Pulls: yes
- Ray: Silver
- Angel/Demon: Michael ↔ Belial
- Crystal: Quartz (SiO2)
- Technical: Info; Solfeggio = 528
- Letter: Aleph (א)
- Astrology: Uranus
- Deities: Thoth
- Artifact: Wand
- Pigment: White
- Secret Tara: 1
- Thought-form: None
- HGA Fragment: xyz
- Pattern Glyph: abc
- Psyche: none
- Witch Eye Order: A, B; C
- Non-Living Lineage: X; Y
- Unlisted Key: ignored

## Skipped Card
- Ray: Crimson
- Technical: Solfeggio = 417
";

fn write_codex(dir: &Path, markdown: &str) -> std::path::PathBuf {
    let input = dir.join("docs/codex.md");
    std::fs::create_dir_all(input.parent().unwrap()).unwrap();
    std::fs::write(&input, markdown).unwrap();
    input
}

#[test]
fn only_blocks_with_app_pulls_are_written() {
    let tmp = TempDir::new().unwrap();
    let input = write_codex(tmp.path(), CODEX);
    let output = tmp.path().join("assets/data/cards.json");

    let compilation = compile(&input, &output).unwrap();
    assert_eq!(compilation.registry().len(), 1);
    assert_eq!(compilation.skipped(), 1);

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let cards = json.as_array().unwrap();
    assert_eq!(cards.len(), 1);

    let card = &cards[0];
    assert_eq!(card["id"], "the_fool");
    assert_eq!(card["name"], "The Fool");
    assert_eq!(card["suit"], "majors");
    assert_eq!(card["letter"], "Aleph (א)");
    assert_eq!(card["angel"], "Michael");
    assert_eq!(card["demon"], "Belial");
    assert_eq!(card["crystal"], "Quartz");
    assert_eq!(card["chemistry"], "SiO2");
    assert_eq!(card["tara"], "1");
    assert_eq!(card["thought"], "None");
    assert_eq!(card["appPulls"], "yes");
    assert_eq!(card["freq"], 528.0);
    assert_eq!(card["witchEyeOrders"], serde_json::json!(["A", "B", "C"]));
    assert_eq!(card["nonLivingLineages"], serde_json::json!(["X", "Y"]));
    assert_eq!(card.as_object().unwrap().len(), 23);
}

#[test]
fn output_is_indented_and_unescaped() {
    let tmp = TempDir::new().unwrap();
    let input = write_codex(tmp.path(), CODEX);
    let output = tmp.path().join("cards.json");

    compile(&input, &output).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("[\n  {\n    \"id\": \"the_fool\",\n"));
    assert!(text.contains("Michael"));
    assert!(text.contains("\"letter\": \"Aleph (א)\""));
    assert!(!text.contains("\\u"));
}

#[test]
fn compiling_twice_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let input = write_codex(tmp.path(), CODEX);
    let first = tmp.path().join("first.json");
    let second = tmp.path().join("second.json");

    compile(&input, &first).unwrap();
    compile(&input, &second).unwrap();
    compile(&input, &second).unwrap();

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn codex_without_cards_writes_an_empty_array() {
    let tmp = TempDir::new().unwrap();
    let input = write_codex(tmp.path(), "# Nothing here\n\n## Draft\n- Ray: Violet\n");
    let output = tmp.path().join("cards.json");

    let compilation = compile(&input, &output).unwrap();

    assert!(compilation.registry().is_empty());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn compiled_registry_round_trips_and_validates() {
    let tmp = TempDir::new().unwrap();
    let markdown = "## VIII — Strength
- App Pulls: Courage trials
- Ray: Gold-Crimson (Ray 1)
- Witch Eye Order: Order of the Lion's Vigil

## Queen of Coins
- App Pulls: Treasury
- Ray: red

## Knight of Wands
- App Pulls: Forge
- Ray: Violet flame
- Technical: Solfeggio = 963
";
    let input = write_codex(tmp.path(), markdown);
    let output = tmp.path().join("cards.json");

    let compilation = compile(&input, &output).unwrap();
    let loaded = Registry::load(&output).unwrap();

    assert_eq!(&loaded, compilation.registry());
    let suits: Vec<Suit> = loaded.cards().iter().map(|card| card.suit).collect();
    assert_eq!(suits, [Suit::Majors, Suit::Pentacles, Suit::Wands]);
    assert_eq!(loaded.cards()[0].id, "viii_strength");
    assert!(validate(loaded.cards()).is_empty());
}

#[test]
fn duplicate_ids_compile_but_fail_validation() {
    let tmp = TempDir::new().unwrap();
    let markdown = "## The Fool\n- App Pulls: a\n\n## The  Fool\n- App Pulls: b\n";
    let input = write_codex(tmp.path(), markdown);
    let output = tmp.path().join("cards.json");

    let compilation = compile(&input, &output).unwrap();

    assert_eq!(compilation.registry().len(), 2);
    assert!(!validate(compilation.registry().cards()).is_empty());
}

#[test]
fn missing_input_fails() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("cards.json");

    assert!(compile(&tmp.path().join("missing.md"), &output).is_err());
    assert!(!output.exists());
}

#[test]
fn binary_reports_summary() {
    let tmp = TempDir::new().unwrap();
    let input = write_codex(tmp.path(), CODEX);
    let output = tmp.path().join("out/cards.json");

    let result = Command::new(env!("CARGO_BIN_EXE_registry-compile"))
        .current_dir(tmp.path())
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("Wrote 1 cards"));
    assert!(stdout.contains(&output.display().to_string()));
    assert!(output.exists());
}

#[test]
fn binary_uses_configured_defaults() {
    let tmp = TempDir::new().unwrap();
    write_codex(tmp.path(), CODEX);
    std::fs::write(
        tmp.path().join("registry.toml"),
        "_version = \"1\"\ninput = \"docs/codex.md\"\noutput = \"public/cards.json\"\n",
    )
    .unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_registry-compile"))
        .current_dir(tmp.path())
        .output()
        .unwrap();

    assert!(result.status.success());
    assert!(tmp.path().join("public/cards.json").exists());
}

#[test]
fn binary_fails_on_missing_input() {
    let tmp = TempDir::new().unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_registry-compile"))
        .current_dir(tmp.path())
        .arg("missing.md")
        .arg("cards.json")
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(!tmp.path().join("cards.json").exists());
}

#[test]
fn binary_validate_flags_duplicates() {
    let tmp = TempDir::new().unwrap();
    let markdown = "## The Fool\n- App Pulls: a\n\n## The  Fool\n- App Pulls: b\n";
    let input = write_codex(tmp.path(), markdown);
    let output = tmp.path().join("cards.json");
    compile(&input, &output).unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_registry-validate"))
        .current_dir(tmp.path())
        .args(["cards.json", "--format", "summary"])
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(2));
    assert!(String::from_utf8(result.stdout).unwrap().starts_with("issues="));
}

#[test]
fn binary_validate_accepts_healthy_registry() {
    let tmp = TempDir::new().unwrap();
    let input = write_codex(tmp.path(), CODEX);
    compile(&input, &tmp.path().join("assets/data/cards.json")).unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_registry-validate"))
        .current_dir(tmp.path())
        .args(["--format", "summary"])
        .output()
        .unwrap();

    assert!(result.status.success());
    assert_eq!(String::from_utf8(result.stdout).unwrap().trim(), "issues=0");
}

#[test]
fn binary_compiles_input_named_validate() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("validate"), CODEX).unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_registry-compile"))
        .current_dir(tmp.path())
        .args(["validate", "out.json"])
        .output()
        .unwrap();

    assert!(result.status.success());
    assert_eq!(
        String::from_utf8(result.stdout).unwrap(),
        "Wrote 1 cards -> out.json\n"
    );
    assert_eq!(Registry::load(&tmp.path().join("out.json")).unwrap().len(), 1);
}

#[test]
fn oversized_solfeggio_value_fails_without_writing() {
    let tmp = TempDir::new().unwrap();
    let markdown = format!(
        "## The Star\n- App Pulls: yes\n- Technical: Solfeggio = 1{}\n",
        "0".repeat(400)
    );
    let input = write_codex(tmp.path(), &markdown);
    let output = tmp.path().join("cards.json");

    assert!(compile(&input, &output).is_err());
    assert!(!output.exists());
}

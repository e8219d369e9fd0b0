use serde_json::{Map, json};
use triage::core::settings::{defaults, resolve};

#[test]
fn test_override_replaces_whole_bucket() {
    let mut overrides = Map::new();
    overrides.insert("pending".into(), json!({ "emojis": ["fire"] }));

    let settings = resolve(&overrides).unwrap();

    assert_eq!(settings.pending.emojis, vec!["fire"]);
    // No deep merge: the default title is gone too.
    assert_eq!(settings.pending.title, "");
    assert_eq!(settings.review.emojis, vec!["eyes"]);
}

#[test]
fn test_top_level_scalars_override() {
    let mut overrides = Map::new();
    overrides.insert("publish_text".into(), json!("share"));
    overrides.insert("display".into(), json!(["review"]));

    let settings = resolve(&overrides).unwrap();

    assert_eq!(settings.publish_text, "share");
    assert_eq!(settings.display, vec!["review"]);
    assert!(settings.unfurl_links);
}

#[test]
fn test_unrecognized_keys_are_ignored() {
    let mut overrides = Map::new();
    overrides.insert("colour".into(), json!("blue"));

    assert!(resolve(&overrides).is_ok());
}

#[test]
fn test_malformed_override_fails_to_resolve() {
    let mut overrides = Map::new();
    overrides.insert("review".into(), json!({ "title": "no emojis here" }));

    let err = resolve(&overrides).unwrap_err();
    assert!(err.to_string().starts_with("Invalid triage settings"));
}

#[test]
fn test_defaults_are_shared_and_unchanged() {
    let mut overrides = Map::new();
    overrides.insert("unfurl_links".into(), json!(false));
    let _ = resolve(&overrides).unwrap();

    assert_eq!(defaults().get("unfurl_links"), Some(&json!(true)));
    assert!(resolve(&Map::new()).unwrap().unfurl_links);
}

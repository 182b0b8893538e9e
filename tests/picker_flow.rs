//! Integration tests for the picker flow: load, toggle, report, search, submit.
//!
//! Each test builds its store from TOML text so the loader, the store and
//! the reporting helpers are exercised together.

use catpick::app::App;
use catpick::category::search::filter_results;
use catpick::category::summary::counter_text;
use catpick::category::CategoryError;
use catpick::config::Config;
use catpick::loader::{store_from_str, LoadError};
use catpick::output::{change_line, selection_text, tree_lines};
use pretty_assertions::assert_eq;

const SERVICES: &str = r#"
[[category]]
name = "Hosting"

[[category]]
name = "Cloud hosting"
parent = "Hosting"

[[category]]
name = "Data centres"
parent = "Hosting"
id = "dc"

[[category]]
name = "Support"
checked = true

[[category]]
name = "Helpdesk"
parent = "Support"
checked = true

[[category]]
name = "Training"
"#;

// ============================================================================
// Propagation
// ============================================================================

#[test]
fn checking_a_subcategory_checks_its_primary() {
    let mut store = store_from_str(SERVICES).unwrap();
    store.toggle_by_names(["Data centres"]).unwrap();

    assert_eq!(change_line(&store.changes()), "+Hosting +Data centres");
    assert_eq!(counter_text(store.checked_count()), "4 categories selected.");
}

#[test]
fn unchecking_a_primary_unchecks_its_subcategories() {
    let mut store = store_from_str(SERVICES).unwrap();
    store.toggle_by_names(["Support"]).unwrap();

    assert_eq!(change_line(&store.changes()), "-Support -Helpdesk");
    assert_eq!(counter_text(store.checked_count()), "0 categories selected.");
}

#[test]
fn unchecking_a_subcategory_leaves_primary_checked() {
    let mut store = store_from_str(SERVICES).unwrap();
    store.toggle_by_names(["Helpdesk"]).unwrap();

    assert_eq!(change_line(&store.changes()), "-Helpdesk");
    assert!(store.get("Support").unwrap().checked);
}

#[test]
fn each_toggle_reports_only_its_own_changes() {
    let mut store = store_from_str(SERVICES).unwrap();
    store.toggle_by_names(["Cloud hosting"]).unwrap();
    store.toggle_by_names(["Training"]).unwrap();

    assert_eq!(change_line(&store.changes()), "+Training");
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn ids_default_from_names() {
    let store = store_from_str(SERVICES).unwrap();
    assert_eq!(
        store.get("Cloud hosting").unwrap().element_id,
        "category-cloud-hosting"
    );
    assert_eq!(store.get("Data centres").unwrap().element_id, "dc");
}

#[test]
fn nested_subcategories_are_rejected() {
    let toml = r#"
[[category]]
name = "A"

[[category]]
name = "B"
parent = "A"

[[category]]
name = "C"
parent = "B"
"#;
    let err = store_from_str(toml).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invalid(CategoryError::TooDeep { ref child, .. }) if child == "C"
    ));
}

#[test]
fn tree_listing_reflects_state() {
    let store = store_from_str(SERVICES).unwrap();
    assert_eq!(
        tree_lines(&store),
        vec![
            "[ ] Hosting (2 subcategories)",
            "    [ ] Cloud hosting",
            "    [ ] Data centres",
            "[x] Support (1 subcategory, 1 selected)",
            "    [x] Helpdesk",
            "[ ] Training",
        ]
    );
}

// ============================================================================
// Search and submission
// ============================================================================

#[test]
fn search_matches_in_list_order() {
    let store = store_from_str(SERVICES).unwrap();
    assert_eq!(
        filter_results(&store, "ing", true),
        vec!["Hosting", "Cloud hosting", "Training"]
    );
    assert!(filter_results(&store, "", true).is_empty());
}

#[test]
fn app_session_submits_checked_categories() {
    let store = store_from_str(SERVICES).unwrap();
    let mut app = App::new(store, &Config::default());

    app.enter_search();
    for c in "cloud".chars() {
        app.search_push(c);
    }
    app.toggle_search_result().unwrap();
    app.commit_search();
    app.toggle("Helpdesk").unwrap();

    assert_eq!(app.counter(), "3 categories selected.");
    assert_eq!(
        selection_text(&app.selection()),
        "Hosting\nCloud hosting\nSupport"
    );
}

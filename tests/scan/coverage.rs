use intlint::Scanner;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::util::{formatjs_config, i18next_config, write_file};

#[test]
fn coverage_measures_against_default_locale_universe() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "locales/en/common.json",
        r#"{"a": "A", "b": "B", "c": "C", "d": "D"}"#,
    );
    write_file(
        dir.path(),
        "locales/fr/common.json",
        r#"{"a": "Ah", "b": "Beh", "c": ""}"#,
    );
    write_file(dir.path(), "src/App.tsx", r#"const x = t("common:a");"#);

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();

    let en = &result.coverage.by_locale["en"];
    assert_eq!(en.total_keys, 4);
    assert_eq!(en.translated_keys, 4);
    assert_eq!(en.percentage, 100.0);

    let fr = &result.coverage.by_locale["fr"];
    assert_eq!(fr.total_keys, 4);
    // "c" is empty, so it does not count as translated
    assert_eq!(fr.translated_keys, 2);
    assert_eq!(fr.percentage, 50.0);
    assert_eq!(
        fr.missing_keys,
        vec!["common:c".to_string(), "common:d".to_string()]
    );

    // Overall aggregates the non-default locales
    assert_eq!(result.coverage.overall.total_keys, 4);
    assert_eq!(result.coverage.overall.translated_keys, 2);
}

#[test]
fn coverage_budgets_gate_budget_met() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "locales/en/common.json",
        r#"{"a": "A", "b": "B"}"#,
    );
    write_file(dir.path(), "locales/fr/common.json", r#"{"a": "Ah"}"#);
    write_file(dir.path(), "src/App.tsx", r#"const x = t("common:a");"#);

    let mut config = i18next_config();
    config.budgets.coverage.insert("fr".to_string(), 75.0);
    let scanner = Scanner::new(config, dir.path()).unwrap();
    let result = scanner.scan();

    let fr = &result.coverage.by_locale["fr"];
    assert_eq!(fr.percentage, 50.0);
    assert!(!fr.budget_met);
    assert!(!result.coverage.overall.budget_met);

    // A reachable budget is met
    let mut config = i18next_config();
    config.budgets.coverage.insert("fr".to_string(), 50.0);
    let result = Scanner::new(config, dir.path()).unwrap().scan();
    assert!(result.coverage.by_locale["fr"].budget_met);
    assert!(result.coverage.overall.budget_met);
}

#[test]
fn coverage_percentages_stay_in_bounds() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "lang/en.json", r#"{"x": "X"}"#);
    write_file(dir.path(), "lang/de.json", r#"{"x": "Ix", "y": "Ypsilon"}"#);
    write_file(
        dir.path(),
        "src/App.tsx",
        r#"const x = formatMessage({ id: "x" });"#,
    );

    let scanner = Scanner::new(formatjs_config(), dir.path()).unwrap();
    let result = scanner.scan();

    for coverage in result.coverage.by_locale.values() {
        assert!(coverage.percentage >= 0.0);
        assert!(coverage.percentage <= 100.0);
        assert!(coverage.translated_keys <= coverage.total_keys);
    }
    // de has extra keys beyond the universe; they do not inflate coverage
    assert_eq!(result.coverage.by_locale["de"].percentage, 100.0);
}

#[test]
fn locales_without_budget_always_meet_it() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "locales/en/common.json", r#"{"a": "A"}"#);
    write_file(dir.path(), "locales/fr/common.json", "{}");
    write_file(dir.path(), "src/App.tsx", r#"const x = t("common:a");"#);

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();
    assert_eq!(result.coverage.by_locale["fr"].percentage, 0.0);
    assert!(result.coverage.by_locale["fr"].budget_met);
}

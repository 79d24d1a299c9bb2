use intlint::{Rule, Scanner, Severity};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::util::{i18next_config, write_file};

fn write_two_locale_project(root: &std::path::Path) {
    write_file(
        root,
        "locales/en/common.json",
        r#"{"welcome": "Welcome", "unused": "Never called"}"#,
    );
    write_file(root, "locales/fr/common.json", r#"{"unused": "Jamais"}"#);
    write_file(
        root,
        "src/App.tsx",
        r#"
export function App() {
    return <h1>{t("common:welcome")}</h1>;
}
"#,
    );
}

#[test]
fn key_missing_from_one_locale_is_flagged_once() {
    let dir = tempdir().unwrap();
    write_two_locale_project(dir.path());

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();

    let missing: Vec<_> = result
        .findings
        .iter()
        .filter(|f| f.rule_id == Rule::MissingKey)
        .collect();
    // en defines common:welcome, fr does not: exactly one finding, for fr
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity, Severity::Error);
    assert!(missing[0].message.contains("common:welcome"));
    assert!(missing[0].message.contains("\"fr\""));
    assert!(!missing[0].message.contains("\"en\""));

    let suggestion = missing[0].suggestion.as_ref().unwrap();
    assert_eq!(suggestion.key.as_deref(), Some("common:welcome"));
    assert_eq!(
        suggestion.catalog_path.as_deref(),
        Some("locales/fr/common.json")
    );
}

#[test]
fn unused_key_is_flagged_in_whole_project_scan_only() {
    let dir = tempdir().unwrap();
    write_two_locale_project(dir.path());

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();

    let unused: Vec<_> = result
        .findings
        .iter()
        .filter(|f| f.rule_id == Rule::UnusedKey)
        .collect();
    // common:unused is defined in the default locale but never called;
    // common:welcome is called and must not be flagged
    assert_eq!(unused.len(), 1);
    assert_eq!(unused[0].severity, Severity::Warning);
    assert!(unused[0].message.contains("common:unused"));
    assert!(unused[0].file.ends_with("en/common.json"));

    // The single-file entry point skips reconciliation
    let content = std::fs::read_to_string(dir.path().join("src/App.tsx")).unwrap();
    let single = scanner.scan_single_file("src/App.tsx", &content);
    assert_eq!(single.summary.unused, 0);
    assert_eq!(single.summary.missing, 1);
}

#[test]
fn unused_key_points_at_catalog_line() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "locales/en/common.json",
        "{\n  \"used\": \"Used\",\n  \"dangling\": \"Dangling\"\n}",
    );
    write_file(dir.path(), "locales/fr/common.json", "{}");
    write_file(
        dir.path(),
        "src/App.tsx",
        r#"const x = t("common:used");"#,
    );

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();

    let unused = result
        .findings
        .iter()
        .find(|f| f.rule_id == Rule::UnusedKey)
        .unwrap();
    // "dangling" is declared on line 3 of the catalog file
    assert_eq!(unused.line, 3);
    assert_eq!(unused.source, "Dangling");
}

#[test]
fn repeated_scans_are_identical() {
    let dir = tempdir().unwrap();
    write_two_locale_project(dir.path());

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let first = scanner.scan();
    let second = scanner.scan();

    assert_eq!(first.findings, second.findings);
    assert_eq!(
        first.findings.iter().map(|f| &f.id).collect::<Vec<_>>(),
        second.findings.iter().map(|f| &f.id).collect::<Vec<_>>()
    );
}

#[test]
fn finding_ids_are_stable_across_scanner_instances() {
    let dir = tempdir().unwrap();
    write_two_locale_project(dir.path());

    let first = Scanner::new(i18next_config(), dir.path()).unwrap().scan();
    let second = Scanner::new(i18next_config(), dir.path()).unwrap().scan();
    assert_eq!(
        first.findings.iter().map(|f| &f.id).collect::<Vec<_>>(),
        second.findings.iter().map(|f| &f.id).collect::<Vec<_>>()
    );
}

#[test]
fn every_used_key_missing_from_a_locale_has_exactly_one_finding() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "locales/en/common.json",
        r#"{"a": "A", "b": "B"}"#,
    );
    write_file(dir.path(), "locales/fr/common.json", r#"{"a": "A"}"#);
    write_file(
        dir.path(),
        "src/App.tsx",
        r#"
export function App() {
    return (
        <div>
            {t("common:a")}
            {t("common:b")}
            {t("common:c")}
        </div>
    );
}
"#,
    );

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();

    let missing: Vec<_> = result
        .findings
        .iter()
        .filter(|f| f.rule_id == Rule::MissingKey)
        .collect();
    // a: present everywhere. b: missing in fr. c: missing in en and fr.
    assert_eq!(missing.len(), 3);
    let fr_count = missing
        .iter()
        .filter(|f| f.message.contains("\"fr\""))
        .count();
    let en_count = missing
        .iter()
        .filter(|f| f.message.contains("\"en\""))
        .count();
    assert_eq!(fr_count, 2);
    assert_eq!(en_count, 1);
}

#[test]
fn namespace_resolution_through_hook_binding() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "locales/en/auth.json", r#"{"login": "Log in"}"#);
    write_file(dir.path(), "locales/fr/auth.json", r#"{"login": "Connexion"}"#);
    write_file(
        dir.path(),
        "src/Login.tsx",
        r#"
export function Login() {
    const { t } = useTranslation("auth");
    return <button>{t("login")}</button>;
}
"#,
    );

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();
    assert_eq!(result.summary.missing, 0);
    assert_eq!(result.summary.unused, 0);
}

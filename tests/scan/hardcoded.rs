use intlint::findings::SuggestionKind;
use intlint::{Rule, Scanner, Severity};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::util::{i18next_config, write_file};

#[test]
fn markup_text_without_translation_wrapper_is_reported() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "locales/en/common.json", r#"{"ok": "OK"}"#);
    write_file(dir.path(), "locales/fr/common.json", r#"{"ok": "OK"}"#);
    write_file(
        dir.path(),
        "src/Banner.tsx",
        r#"
export function Banner() {
    return <div>Hello there</div>;
}
"#,
    );

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();

    let hardcoded: Vec<_> = result
        .findings
        .iter()
        .filter(|f| f.rule_id == Rule::HardcodedText)
        .collect();
    assert_eq!(hardcoded.len(), 1);

    let finding = hardcoded[0];
    assert_eq!(finding.severity, Severity::Warning);
    assert!(finding.message.contains("Hello there"));
    assert!(finding.file.ends_with("Banner.tsx"));

    let suggestion = finding.suggestion.as_ref().expect("externalize suggestion");
    assert_eq!(suggestion.kind, SuggestionKind::Externalize);
    assert!(suggestion.key.is_some());
}

#[test]
fn short_numeric_and_denylisted_text_is_skipped() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "locales/en/common.json", "{}");
    write_file(dir.path(), "locales/fr/common.json", "{}");
    write_file(
        dir.path(),
        "src/Edge.tsx",
        r#"
export function Edge() {
    return (
        <div>
            <span>OK</span>
            <span>42</span>
            <span>...</span>
            <span>true</span>
        </div>
    );
}
"#,
    );

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();
    assert_eq!(result.summary.hard_coded, 0);
}

#[test]
fn checked_attributes_are_reported_with_positions() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "locales/en/common.json", "{}");
    write_file(dir.path(), "locales/fr/common.json", "{}");
    write_file(
        dir.path(),
        "src/Form.tsx",
        r#"
export function Form() {
    return (
        <form>
            <input placeholder="Your email address" type="email" />
            <img alt="Company logo" src="/logo.png" />
        </form>
    );
}
"#,
    );

    let scanner = Scanner::new(i18next_config(), dir.path()).unwrap();
    let result = scanner.scan();

    assert_eq!(result.summary.hard_coded, 2);
    for finding in &result.findings {
        assert!(finding.line >= 1);
        assert!(finding.column >= 1);
        assert!(finding.end_line >= finding.line);
    }
    // type="email" and src="/logo.png" are not in the attribute allowlist
    assert!(!result.findings.iter().any(|f| f.message.contains("email\"")));
}

#[test]
fn generated_suggestion_keys_respect_max_len() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "locales/en/common.json", "{}");
    write_file(dir.path(), "locales/fr/common.json", "{}");
    write_file(
        dir.path(),
        "src/Long.tsx",
        r#"
export function Long() {
    return <p>This is a rather long piece of user interface copy that slugs into many words</p>;
}
"#,
    );

    let mut config = i18next_config();
    config.keygen.max_len = 20;
    let scanner = Scanner::new(config, dir.path()).unwrap();
    let result = scanner.scan();

    let suggestion = result
        .findings
        .iter()
        .find(|f| f.rule_id == Rule::HardcodedText)
        .and_then(|f| f.suggestion.as_ref())
        .expect("hardcoded finding with suggestion");
    let key = suggestion.key.as_ref().unwrap();
    assert!(key.chars().count() <= 20, "key too long: {:?}", key);
}

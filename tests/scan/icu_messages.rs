use intlint::{Rule, Scanner, Severity};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::util::{formatjs_config, lingui_config, write_file};

#[test]
fn invalid_default_message_yields_icu_finding() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "lang/en.json",
        r#"{"cart.items": "{count, plural, one {# item} other {# items}}"}"#,
    );
    write_file(dir.path(), "lang/de.json", r#"{"cart.items": "..."}"#);
    write_file(
        dir.path(),
        "src/Cart.tsx",
        r#"
export function Cart() {
    const intl = useIntl();
    return intl.formatMessage(
        { id: "cart.items", defaultMessage: "{count, plural, one {# item}}" },
        { count },
    );
}
"#,
    );

    let scanner = Scanner::new(formatjs_config(), dir.path()).unwrap();
    let result = scanner.scan();

    let icu: Vec<_> = result
        .findings
        .iter()
        .filter(|f| f.rule_id == Rule::IcuSyntax)
        .collect();
    assert_eq!(icu.len(), 1);
    assert_eq!(icu[0].severity, Severity::Error);
    assert!(icu[0].message.contains("'other'"));
    assert_eq!(result.summary.icu_errors, 1);
}

#[test]
fn valid_default_message_has_no_icu_findings() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "lang/en.json",
        r#"{"cart.items": "items"}"#,
    );
    write_file(dir.path(), "lang/de.json", r#"{"cart.items": "Artikel"}"#);
    write_file(
        dir.path(),
        "src/Cart.tsx",
        r#"
export function Cart() {
    return (
        <FormattedMessage
            id="cart.items"
            defaultMessage="{count, plural, one {# item} other {# items}}"
            values={{ count }}
        />
    );
}
"#,
    );

    let scanner = Scanner::new(formatjs_config(), dir.path()).unwrap();
    let result = scanner.scan();
    assert_eq!(result.summary.icu_errors, 0);
    assert_eq!(result.summary.missing, 0);
}

#[test]
fn lingui_literals_are_keys_and_templates() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "locale/en.properties",
        "Save changes = Save changes\nSign out = Sign out\n",
    );
    write_file(
        dir.path(),
        "locale/es.properties",
        "Save changes = Guardar cambios\n",
    );
    write_file(
        dir.path(),
        "src/Account.tsx",
        r#"
import { t } from "@lingui/macro";

export function Account() {
    return (
        <div>
            <button>{t`Save changes`}</button>
            <Trans>Sign out</Trans>
        </div>
    );
}
"#,
    );

    let scanner = Scanner::new(lingui_config(), dir.path()).unwrap();
    let result = scanner.scan();

    // "Sign out" is missing from es
    let missing: Vec<_> = result
        .findings
        .iter()
        .filter(|f| f.rule_id == Rule::MissingKey)
        .collect();
    assert_eq!(missing.len(), 1);
    assert!(missing[0].message.contains("Sign out"));
    assert!(missing[0].message.contains("\"es\""));

    // Text inside <Trans> is being translated, not hardcoded
    assert_eq!(result.summary.hard_coded, 0);
    assert_eq!(result.summary.unused, 0);
}

#[test]
fn lingui_placeholder_template_resolves_to_icu_message() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "locale/en.properties",
        "Hello {name} = Hello {name}\n",
    );
    write_file(
        dir.path(),
        "locale/es.properties",
        "Hello {name} = Hola {name}\n",
    );
    write_file(
        dir.path(),
        "src/Greet.tsx",
        r#"
import { t } from "@lingui/macro";

export function Greet({ name }) {
    return <p>{t`Hello ${name}`}</p>;
}
"#,
    );

    let scanner = Scanner::new(lingui_config(), dir.path()).unwrap();
    let result = scanner.scan();
    assert_eq!(result.summary.missing, 0);
    assert_eq!(result.summary.icu_errors, 0);
    assert_eq!(result.summary.unused, 0);
}

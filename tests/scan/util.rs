use std::fs;
use std::path::Path;

use intlint::config::{CatalogsConfig, FormatjsCatalogs, I18nextCatalogs, LinguiCatalogs};
use intlint::{Config, LibrarySelector};

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// i18next-style project config: namespaced catalogs under
/// `locales/{locale}/{namespace}.json`, locales en + fr.
pub fn i18next_config() -> Config {
    Config {
        library: LibrarySelector::I18next,
        src: vec!["src".to_string()],
        locales: vec!["en".to_string(), "fr".to_string()],
        default_locale: "en".to_string(),
        catalogs: CatalogsConfig {
            i18next: Some(I18nextCatalogs {
                path: "locales/{locale}/{namespace}.json".to_string(),
                default_namespace: "translation".to_string(),
            }),
            ..Default::default()
        },
        ..Config::default()
    }
}

/// formatjs-style project config: flat catalogs under `lang/{locale}.json`.
pub fn formatjs_config() -> Config {
    Config {
        library: LibrarySelector::Formatjs,
        src: vec!["src".to_string()],
        locales: vec!["en".to_string(), "de".to_string()],
        default_locale: "en".to_string(),
        catalogs: CatalogsConfig {
            formatjs: Some(FormatjsCatalogs {
                glob: vec!["lang/{locale}.json".to_string()],
                path: None,
            }),
            ..Default::default()
        },
        ..Config::default()
    }
}

/// lingui-style project config: line-based catalogs under
/// `locale/{locale}.properties`.
pub fn lingui_config() -> Config {
    Config {
        library: LibrarySelector::Lingui,
        src: vec!["src".to_string()],
        locales: vec!["en".to_string(), "es".to_string()],
        default_locale: "en".to_string(),
        catalogs: CatalogsConfig {
            lingui: Some(LinguiCatalogs {
                path: "locale/{locale}.properties".to_string(),
            }),
            ..Default::default()
        },
        ..Config::default()
    }
}

//! Built-in scaffold assets and the file plan they produce

use std::collections::BTreeMap;

const TSCONFIG: &str = include_str!("../../assets/tsconfig.json");
const GITIGNORE: &str = include_str!("../../assets/gitignore");
const NPMIGNORE: &str = include_str!("../../assets/npmignore");
const ENTRY: &str = include_str!("../../assets/index.ts");
const UTILS: &str = include_str!("../../assets/utils.ts");
const README: &str = include_str!("../../assets/README.md.tmpl");
const RELEASE_SCRIPT: &str = include_str!("../../assets/release.mjs");
const BUMP_SCRIPT: &str = include_str!("../../assets/bump-version.mjs");

/// Which scaffold step a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Build-tool config and ignore lists
    Config,
    /// Entry placeholder and utility module
    Source,
    /// README, skippable
    Docs,
    /// Release and bump automation
    Script,
}

/// A file the scaffold lays down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    /// Path relative to the project root
    pub path: String,
    pub content: String,
    pub kind: AssetKind,
}

/// Source of scaffold file contents.
///
/// The driver asks for files by kind, so tests and embedders can swap in
/// their own content without touching the sequencing logic.
pub trait AssetProvider {
    fn files(&self, kind: AssetKind, vars: &TemplateVars) -> Vec<ScaffoldFile>;
}

/// Assets compiled into the binary
#[derive(Debug, Clone, Default)]
pub struct BuiltinAssets;

impl AssetProvider for BuiltinAssets {
    fn files(&self, kind: AssetKind, vars: &TemplateVars) -> Vec<ScaffoldFile> {
        let file = |path: &str, template: &str| ScaffoldFile {
            path: path.to_string(),
            content: vars.render(template),
            kind,
        };

        match kind {
            AssetKind::Config => vec![
                file("tsconfig.json", TSCONFIG),
                file(".gitignore", GITIGNORE),
                file(".npmignore", NPMIGNORE),
            ],
            AssetKind::Source => {
                let entry = vars.get("entry").unwrap_or("src/index.ts");
                let utils = match entry.rsplit_once('/') {
                    Some((dir, _)) => format!("{}/utils/index.ts", dir),
                    None => "utils/index.ts".to_string(),
                };
                vec![file(entry, ENTRY), file(&utils, UTILS)]
            }
            AssetKind::Docs => vec![file("README.md", README)],
            AssetKind::Script => vec![
                file("scripts/release.mjs", RELEASE_SCRIPT),
                file("scripts/bump-version.mjs", BUMP_SCRIPT),
            ],
        }
    }
}

/// `{{key}}` substitutions applied to asset text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Replace every known `{{key}}`; unknown placeholders are left as-is.
    pub fn render(&self, template: &str) -> String {
        self.values
            .iter()
            .fold(template.to_string(), |text, (key, value)| {
                text.replace(&format!("{{{{{}}}}}", key), value)
            })
    }
}

//! Typed view over an order-preserving `package.json` document

use super::version::parse_lenient;
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields that must be strings when present
const STRING_FIELDS: &[&str] = &["name", "version", "description", "license", "type", "main"];

/// Package author, either `"Name <email> (url)"` or an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Text(String),
    Person {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl Author {
    /// Display name without email or url decorations
    pub fn name(&self) -> &str {
        match self {
            Author::Text(text) => text
                .split(['<', '('])
                .next()
                .map(str::trim)
                .unwrap_or(text.as_str()),
            Author::Person { name, .. } => name,
        }
    }
}

/// The `bin` field in either of its two shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bin {
    /// Single entry; the command name is the package name
    Single(String),
    Map(Vec<(String, String)>),
}

/// A loaded project descriptor.
///
/// The underlying object keeps insertion order, so fields this tool never
/// touches are written back exactly where they were.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    fields: Map<String, Value>,
}

impl Descriptor {
    /// Parse and validate descriptor JSON text.
    ///
    /// Returns a human-readable reason on failure; the editor attaches the path.
    pub fn parse(text: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| format!("invalid JSON: {}", e))?;
        let Value::Object(fields) = value else {
            return Err("expected a JSON object at the top level".to_string());
        };
        let descriptor = Self { fields };
        descriptor.validate()?;
        Ok(descriptor)
    }

    fn validate(&self) -> Result<(), String> {
        for key in STRING_FIELDS {
            if let Some(value) = self.fields.get(*key) {
                if !value.is_string() {
                    return Err(format!("field \"{}\" must be a string", key));
                }
            }
        }

        if let Some(scripts) = self.fields.get("scripts") {
            check_string_map(scripts, "scripts")?;
        }

        match self.fields.get("bin") {
            None | Some(Value::String(_)) => {}
            Some(bin @ Value::Object(_)) => check_string_map(bin, "bin")?,
            Some(_) => return Err("field \"bin\" must be a string or an object".to_string()),
        }

        match self.fields.get("author") {
            None | Some(Value::String(_)) | Some(Value::Object(_)) => {}
            Some(_) => return Err("field \"author\" must be a string or an object".to_string()),
        }

        Ok(())
    }

    /// Serialize with two-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> String {
        let mut text = serde_json::to_string_pretty(&self.fields)
            .unwrap_or_else(|_| "{}".to_string());
        text.push('\n');
        text
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    pub fn license(&self) -> Option<&str> {
        self.str_field("license")
    }

    pub fn package_type(&self) -> Option<&str> {
        self.str_field("type")
    }

    pub fn main(&self) -> Option<&str> {
        self.str_field("main")
    }

    /// Current version, `0.0.0` when absent or unparsable.
    pub fn version(&self) -> Version {
        self.str_field("version")
            .map(parse_lenient)
            .unwrap_or_else(|| Version::new(0, 0, 0))
    }

    pub fn set_version(&mut self, version: &Version) {
        self.fields
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    pub fn author(&self) -> Option<Author> {
        self.fields
            .get("author")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn bin(&self) -> Option<Bin> {
        match self.fields.get("bin")? {
            Value::String(entry) => Some(Bin::Single(entry.clone())),
            Value::Object(map) => Some(Bin::Map(
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.fields
            .get("scripts")
            .and_then(Value::as_object)
            .and_then(|scripts| scripts.get(name))
            .and_then(Value::as_str)
    }

    pub fn has_dev_dependency(&self, name: &str) -> bool {
        self.fields
            .get("devDependencies")
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.contains_key(name))
    }

    /// Package name with any `@scope/` prefix removed.
    pub fn unscoped_name(&self) -> Option<&str> {
        self.name()
            .map(|name| name.rsplit('/').next().unwrap_or(name))
            .filter(|name| !name.is_empty())
    }

    /// Command a user types to run this package's CLI.
    pub fn command_name(&self) -> Option<String> {
        match self.bin() {
            Some(Bin::Map(entries)) if !entries.is_empty() => Some(entries[0].0.clone()),
            _ => self.unscoped_name().map(str::to_string),
        }
    }

    /// Set a top-level string field only if it is absent. Returns true if set.
    pub fn ensure_field(&mut self, key: &str, value: &str) -> bool {
        if self.fields.contains_key(key) {
            return false;
        }
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
        true
    }

    /// Add a script only if no script of that name exists. Returns true if set.
    pub fn ensure_script(&mut self, name: &str, command: &str) -> bool {
        let scripts = self
            .fields
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(scripts) = scripts.as_object_mut() else {
            return false;
        };
        if scripts.contains_key(name) {
            return false;
        }
        scripts.insert(name.to_string(), Value::String(command.to_string()));
        true
    }

    /// Register a bin entry only if absent.
    ///
    /// A string-form `bin` is a user decision and is never converted.
    pub fn ensure_bin(&mut self, command: &str, entry: &str) -> bool {
        let bin = self
            .fields
            .entry("bin")
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(bin) = bin.as_object_mut() else {
            return false;
        };
        if bin.contains_key(command) {
            return false;
        }
        bin.insert(command.to_string(), Value::String(entry.to_string()));
        true
    }
}

fn check_string_map(value: &Value, field: &str) -> Result<(), String> {
    let Some(map) = value.as_object() else {
        return Err(format!("field \"{}\" must be an object", field));
    };
    match map.iter().find(|(_, v)| !v.is_string()) {
        Some((key, _)) => Err(format!("field \"{}.{}\" must be a string", field, key)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Descriptor {
        Descriptor::parse(text).unwrap()
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(Descriptor::parse("[1, 2]").is_err());
        assert!(Descriptor::parse("not json").is_err());
    }

    #[test]
    fn test_rejects_wrong_field_shapes() {
        assert!(Descriptor::parse(r#"{"version": 3}"#)
            .unwrap_err()
            .contains("version"));
        assert!(Descriptor::parse(r#"{"scripts": {"build": 1}}"#)
            .unwrap_err()
            .contains("scripts.build"));
        assert!(Descriptor::parse(r#"{"bin": ["a"]}"#).is_err());
        assert!(Descriptor::parse(r#"{"author": 7}"#).is_err());
    }

    #[test]
    fn test_missing_version_defaults_to_zero() {
        assert_eq!(parse("{}").version(), Version::new(0, 0, 0));
        assert_eq!(parse(r#"{"version": "oops"}"#).version(), Version::new(0, 0, 0));
    }

    #[test]
    fn test_author_forms() {
        let text = parse(r#"{"author": "Ada Lovelace <ada@example.com> (https://ada.dev)"}"#);
        assert_eq!(text.author().unwrap().name(), "Ada Lovelace");

        let person = parse(r#"{"author": {"name": "Grace", "email": "g@example.com"}}"#);
        assert_eq!(person.author().unwrap().name(), "Grace");
    }

    #[test]
    fn test_command_name_prefers_bin_key() {
        let d = parse(r#"{"name": "@acme/widget", "bin": {"wdg": "dist/index.js"}}"#);
        assert_eq!(d.command_name().as_deref(), Some("wdg"));

        let d = parse(r#"{"name": "@acme/widget"}"#);
        assert_eq!(d.command_name().as_deref(), Some("widget"));

        let d = parse(r#"{"name": "widget", "bin": "cli.js"}"#);
        assert_eq!(d.command_name().as_deref(), Some("widget"));
    }

    #[test]
    fn test_ensure_script_keeps_user_value() {
        let mut d = parse(r#"{"scripts": {"build": "esbuild src"}}"#);
        assert!(!d.ensure_script("build", "tsc"));
        assert!(d.ensure_script("start", "node dist/index.js"));
        assert_eq!(d.script("build"), Some("esbuild src"));
        assert_eq!(d.script("start"), Some("node dist/index.js"));
    }

    #[test]
    fn test_ensure_bin_leaves_string_form() {
        let mut d = parse(r#"{"bin": "cli.js"}"#);
        assert!(!d.ensure_bin("widget", "dist/index.js"));
        assert_eq!(d.bin(), Some(Bin::Single("cli.js".to_string())));
    }

    #[test]
    fn test_ensure_field_only_when_absent() {
        let mut d = parse(r#"{"type": "commonjs"}"#);
        assert!(!d.ensure_field("type", "module"));
        assert!(d.ensure_field("main", "dist/index.js"));
        assert_eq!(d.package_type(), Some("commonjs"));
        assert_eq!(d.main(), Some("dist/index.js"));
    }

    #[test]
    fn test_serialization_keeps_key_order() {
        let d = parse(r#"{"zeta": 1, "name": "x", "alpha": {"b": 1, "a": 2}}"#);
        let out = d.to_json_string();
        let zeta = out.find("zeta").unwrap();
        let name = out.find("name").unwrap();
        let alpha = out.find("alpha").unwrap();
        assert!(zeta < name && name < alpha);
        assert!(out.find("\"b\"").unwrap() < out.find("\"a\"").unwrap());
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_set_version_in_place() {
        let mut d = parse(r#"{"name": "x", "version": "1.0.0", "license": "MIT"}"#);
        d.set_version(&Version::new(1, 0, 1));
        assert_eq!(
            d.to_json_string(),
            "{\n  \"name\": \"x\",\n  \"version\": \"1.0.1\",\n  \"license\": \"MIT\"\n}\n"
        );
    }
}

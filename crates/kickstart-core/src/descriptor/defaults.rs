//! Default descriptor fields registered by `init`

use super::document::Descriptor;

/// Values merged into a descriptor without overwriting anything the user set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultFields {
    /// Script name and command pairs, in insertion order
    pub scripts: Vec<(String, String)>,
    /// Built entry point used for `bin` and `main`
    pub entry: String,
    pub package_type: String,
}

impl DefaultFields {
    /// Standard set for a TypeScript package built into `out_dir`.
    pub fn standard(out_dir: &str, run_build: &str) -> Self {
        let entry = format!("{}/index.js", out_dir.trim_end_matches('/'));
        Self {
            scripts: vec![
                ("build".to_string(), "tsc".to_string()),
                ("start".to_string(), format!("node {}", entry)),
                ("prepare".to_string(), run_build.to_string()),
                ("release".to_string(), "node scripts/release.mjs".to_string()),
                ("bump".to_string(), "node scripts/bump-version.mjs".to_string()),
            ],
            entry,
            package_type: "module".to_string(),
        }
    }

    /// Merge into `descriptor`. Idempotent; returns true if anything was added.
    pub fn apply(&self, descriptor: &mut Descriptor) -> bool {
        let mut changed = false;
        for (name, command) in &self.scripts {
            changed |= descriptor.ensure_script(name, command);
        }
        if let Some(command) = descriptor.command_name() {
            changed |= descriptor.ensure_bin(&command, &self.entry);
        }
        changed |= descriptor.ensure_field("type", &self.package_type);
        changed |= descriptor.ensure_field("main", &self.entry);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_twice_is_byte_identical() {
        let defaults = DefaultFields::standard("dist", "npm run build");
        let mut once = Descriptor::parse(r#"{"name": "@acme/tool", "version": "0.1.0"}"#).unwrap();
        assert!(defaults.apply(&mut once));
        let first = once.to_json_string();

        let mut twice = once.clone();
        assert!(!defaults.apply(&mut twice));
        assert_eq!(twice.to_json_string(), first);
    }

    #[test]
    fn test_apply_fills_expected_fields() {
        let defaults = DefaultFields::standard("build/", "pnpm run build");
        let mut d = Descriptor::parse(r#"{"name": "@acme/tool"}"#).unwrap();
        defaults.apply(&mut d);

        assert_eq!(d.script("build"), Some("tsc"));
        assert_eq!(d.script("start"), Some("node build/index.js"));
        assert_eq!(d.script("prepare"), Some("pnpm run build"));
        assert_eq!(d.main(), Some("build/index.js"));
        assert_eq!(d.package_type(), Some("module"));
        assert_eq!(d.command_name().as_deref(), Some("tool"));
    }

    #[test]
    fn test_apply_respects_user_values() {
        let defaults = DefaultFields::standard("dist", "npm run build");
        let mut d = Descriptor::parse(
            r#"{"name": "tool", "type": "commonjs", "scripts": {"build": "rollup -c"}, "bin": {"t": "cli.js"}}"#,
        )
        .unwrap();
        defaults.apply(&mut d);

        assert_eq!(d.package_type(), Some("commonjs"));
        assert_eq!(d.script("build"), Some("rollup -c"));
        assert_eq!(d.command_name().as_deref(), Some("t"));
        assert_eq!(
            d.bin(),
            Some(crate::descriptor::Bin::Map(vec![(
                "t".to_string(),
                "cli.js".to_string()
            )]))
        );
    }

    #[test]
    fn test_nameless_descriptor_gets_no_bin() {
        let defaults = DefaultFields::standard("dist", "npm run build");
        let mut d = Descriptor::parse("{}").unwrap();
        defaults.apply(&mut d);
        assert_eq!(d.bin(), None);
    }
}

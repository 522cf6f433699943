//! Template variables derived from the descriptor and settings

use super::assets::TemplateVars;
use crate::config::Settings;
use crate::descriptor::Descriptor;

/// Fallback when the descriptor has no name
const UNNAMED: &str = "my-package";

/// Variables for README and config templates.
///
/// README fields fall back to neutral text so a bare `npm init -y`
/// descriptor still renders something readable.
pub fn template_vars(descriptor: &Descriptor, settings: &Settings) -> TemplateVars {
    let name = descriptor.name().unwrap_or(UNNAMED);
    let command = descriptor
        .command_name()
        .unwrap_or_else(|| UNNAMED.to_string());
    let author = descriptor
        .author()
        .map(|a| a.name().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| "the authors".to_string());

    TemplateVars::new()
        .set("name", name)
        .set("version", descriptor.version().to_string())
        .set(
            "description",
            descriptor
                .description()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or("A TypeScript package."),
        )
        .set("author", author)
        .set("license", descriptor.license().unwrap_or("UNLICENSED"))
        .set("command", command)
        .set("pm", settings.package_manager.program())
        .set("tag_prefix", settings.tag_prefix.as_str())
        .set("build_script", settings.build_script.as_str())
        .set("entry", settings.entry.as_str())
        .set("out_dir", settings.out_dir.trim_end_matches('/'))
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Theme profiles passed to the renderer as `--configFile` payloads.
//!
//! A profile is static configuration: a mermaid base theme plus a full
//! color-variable set. Theme names without a profile go straight through to
//! the renderer as built-in theme selectors (`-t forest`, `-t neutral`, ...).

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeProfile {
    pub base: &'static str,
    pub variables: &'static [(&'static str, &'static str)],
}

impl ThemeProfile {
    /// Serialize into the renderer's JSON config shape:
    /// `{"theme": ..., "themeVariables": {...}}`.
    pub fn to_config_json(&self) -> Value {
        let mut variables = Map::new();
        for (key, value) in self.variables {
            variables.insert((*key).to_owned(), Value::String((*value).to_owned()));
        }
        let mut config = Map::new();
        config.insert("theme".to_owned(), Value::String(self.base.to_owned()));
        config.insert("themeVariables".to_owned(), Value::Object(variables));
        Value::Object(config)
    }
}

// High-contrast dark palette: blue primaries, gray surfaces, amber notes.
// Used for both `default` and `dark` so diagrams read well on dark UIs.
const CONTRAST_DARK_VARIABLES: &[(&str, &str)] = &[
    ("primaryColor", "#3b82f6"),
    ("primaryTextColor", "#ffffff"),
    ("primaryBorderColor", "#60a5fa"),
    ("secondaryColor", "#374151"),
    ("secondaryTextColor", "#ffffff"),
    ("secondaryBorderColor", "#4b5563"),
    ("tertiaryColor", "#1f2937"),
    ("tertiaryTextColor", "#ffffff"),
    ("background", "#000000"),
    ("mainBkg", "#1f2937"),
    ("textColor", "#f9fafb"),
    ("lineColor", "#6b7280"),
    ("nodeTextColor", "#ffffff"),
    ("nodeBorder", "#60a5fa"),
    ("clusterBkg", "#000000"),
    ("clusterBorder", "#374151"),
    ("titleColor", "#f9fafb"),
    ("edgeLabelBackground", "#1f2937"),
    ("actorBkg", "#3b82f6"),
    ("actorTextColor", "#ffffff"),
    ("actorBorder", "#60a5fa"),
    ("actorLineColor", "#6b7280"),
    ("labelBoxBkgColor", "#1f2937"),
    ("labelBoxBorderColor", "#4b5563"),
    ("labelTextColor", "#f9fafb"),
    ("noteBkgColor", "#fbbf24"),
    ("noteTextColor", "#000000"),
    ("noteBorderColor", "#f59e0b"),
];

pub const CONTRAST_DARK: ThemeProfile =
    ThemeProfile { base: "base", variables: CONTRAST_DARK_VARIABLES };

/// Look up the predefined profile for a theme name, if any.
pub fn theme_profile(name: &str) -> Option<&'static ThemeProfile> {
    match name {
        "default" | "dark" => Some(&CONTRAST_DARK),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{theme_profile, CONTRAST_DARK};

    #[test]
    fn default_and_dark_share_the_contrast_profile() {
        assert_eq!(theme_profile("default"), Some(&CONTRAST_DARK));
        assert_eq!(theme_profile("dark"), Some(&CONTRAST_DARK));
    }

    #[test]
    fn builtin_theme_names_have_no_profile() {
        assert_eq!(theme_profile("forest"), None);
        assert_eq!(theme_profile("neutral"), None);
        assert_eq!(theme_profile(""), None);
    }

    #[test]
    fn config_json_has_base_theme_and_full_variable_set() {
        let config = CONTRAST_DARK.to_config_json();
        assert_eq!(config["theme"], "base");
        let variables = config["themeVariables"].as_object().expect("variables object");
        assert_eq!(variables.len(), CONTRAST_DARK.variables.len());
        assert_eq!(variables["primaryColor"], "#3b82f6");
        assert_eq!(variables["noteBkgColor"], "#fbbf24");
    }
}

use serde::{Deserialize, Serialize};

/// Persisted user preferences.
///
/// Key names and defaults follow the original settings schema: `font` is a
/// "Family Size" string, `transition` is one of the transition ids, and the
/// two booleans control the word sidebar and the line-count label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub font: String,
    pub transition: Transition,
    #[serde(rename = "show-words")]
    pub show_words: bool,
    #[serde(rename = "show-lines")]
    pub show_lines: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font: "Monospace 12".to_owned(),
            transition: Transition::None,
            show_words: true,
            show_lines: true,
        }
    }
}

impl Settings {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    pub fn font_spec(&self) -> FontSpec {
        FontSpec::parse(&self.font)
    }
}

/// Animation used when the visible tab changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    #[default]
    None,
    Crossfade,
    SlideLeftRight,
}

impl Transition {
    pub const ALL: [Transition; 3] = [
        Transition::None,
        Transition::Crossfade,
        Transition::SlideLeftRight,
    ];

    /// The id persisted in the settings store.
    pub fn id(self) -> &'static str {
        match self {
            Transition::None => "none",
            Transition::Crossfade => "crossfade",
            Transition::SlideLeftRight => "slide-left-right",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Transition::None => "None",
            Transition::Crossfade => "Crossfade",
            Transition::SlideLeftRight => "Slide",
        }
    }
}

/// A parsed `font` setting: family name plus point size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Monospace".to_owned(),
            size: 12.0,
        }
    }
}

impl FontSpec {
    /// Parses a "Family Size" string such as `"Monospace 12"`.
    ///
    /// A missing or unparseable size falls back to the default size; an
    /// empty string falls back entirely to the default.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if let Some((family, size)) = s.rsplit_once(' ') {
            if let Ok(size) = size.parse::<f32>() {
                let family = family.trim();
                if size.is_finite() && size > 0.0 && !family.is_empty() {
                    return Self {
                        family: family.to_owned(),
                        size,
                    };
                }
            }
        }
        if s.is_empty() {
            Self::default()
        } else {
            Self {
                family: s.to_owned(),
                ..Self::default()
            }
        }
    }

    pub fn format(&self) -> String {
        format!("{} {}", self.family, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.font, "Monospace 12");
        assert_eq!(settings.transition, Transition::None);
        assert!(settings.show_words);
        assert!(settings.show_lines);
    }

    #[test]
    fn test_json_uses_schema_key_names() {
        let json = Settings::default().to_json();
        assert!(json.contains("\"show-words\""));
        assert!(json.contains("\"show-lines\""));
        assert!(json.contains("\"font\""));
        assert!(json.contains("\"transition\""));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            font: "Sans 16".to_owned(),
            transition: Transition::SlideLeftRight,
            show_words: false,
            show_lines: true,
        };
        let restored = Settings::from_json(&settings.to_json()).unwrap();
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let restored = Settings::from_json("{\"font\":\"Sans 10\"}").unwrap();
        assert_eq!(restored.font, "Sans 10");
        assert_eq!(restored.transition, Transition::None);
        assert!(restored.show_words);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(Settings::from_json("not json").is_none());
    }

    #[test]
    fn test_transition_ids() {
        assert_eq!(Transition::None.id(), "none");
        assert_eq!(Transition::Crossfade.id(), "crossfade");
        assert_eq!(Transition::SlideLeftRight.id(), "slide-left-right");
    }

    #[test]
    fn test_transition_serializes_as_kebab_id() {
        let json = serde_json::to_string(&Transition::SlideLeftRight).unwrap();
        assert_eq!(json, "\"slide-left-right\"");
        let parsed: Transition = serde_json::from_str("\"crossfade\"").unwrap();
        assert_eq!(parsed, Transition::Crossfade);
    }

    #[test]
    fn test_font_spec_parse() {
        let spec = FontSpec::parse("Monospace 14");
        assert_eq!(spec.family, "Monospace");
        assert_eq!(spec.size, 14.0);
    }

    #[test]
    fn test_font_spec_parse_multiword_family() {
        let spec = FontSpec::parse("DejaVu Sans Mono 11");
        assert_eq!(spec.family, "DejaVu Sans Mono");
        assert_eq!(spec.size, 11.0);
    }

    #[test]
    fn test_font_spec_parse_fallbacks() {
        assert_eq!(FontSpec::parse(""), FontSpec::default());

        let no_size = FontSpec::parse("Monospace");
        assert_eq!(no_size.family, "Monospace");
        assert_eq!(no_size.size, FontSpec::default().size);

        let bad_size = FontSpec::parse("Sans huge");
        assert_eq!(bad_size.family, "Sans huge");
        assert_eq!(bad_size.size, FontSpec::default().size);
    }

    #[test]
    fn test_font_spec_format_round_trip() {
        let spec = FontSpec {
            family: "Sans".to_owned(),
            size: 16.0,
        };
        assert_eq!(spec.format(), "Sans 16");
        assert_eq!(FontSpec::parse(&spec.format()), spec);
    }
}

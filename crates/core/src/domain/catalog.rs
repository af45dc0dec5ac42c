use serde::{Deserialize, Serialize};

/// リライトモード（リモートサービスが定義する書き換え戦略）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// トーン（文体ターゲット）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tone {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// モード/トーンカタログ。起動時に一度だけ取得し、セッション中は不変。
/// 取得失敗時は空のまま運用する（デグレードモード）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub modes: Vec<Mode>,
    pub tones: Vec<Tone>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty() && self.tones.is_empty()
    }

    pub fn has_mode(&self, id: &str) -> bool {
        self.modes.iter().any(|m| m.id == id)
    }

    pub fn has_tone(&self, id: &str) -> bool {
        self.tones.iter().any(|t| t.id == id)
    }

    pub fn first_mode_id(&self) -> Option<&str> {
        self.modes.first().map(|m| m.id.as_str())
    }

    pub fn first_tone_id(&self) -> Option<&str> {
        self.tones.first().map(|t| t.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog {
            modes: vec![
                Mode {
                    id: "humanize".into(),
                    name: "Humanize Mode".into(),
                    description: "Light, natural adjustments".into(),
                },
                Mode {
                    id: "manual".into(),
                    name: "Manual % Mode".into(),
                    description: "User-defined percentage".into(),
                },
            ],
            tones: vec![Tone {
                id: "business".into(),
                name: "Business".into(),
                description: "Professional, formal language".into(),
            }],
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = sample();
        assert!(catalog.has_mode("humanize"));
        assert!(catalog.has_mode("manual"));
        assert!(!catalog.has_mode("extreme"));
        assert!(catalog.has_tone("business"));
        assert!(!catalog.has_tone("casual"));
    }

    #[test]
    fn test_first_ids() {
        let catalog = sample();
        assert_eq!(catalog.first_mode_id(), Some("humanize"));
        assert_eq!(catalog.first_tone_id(), Some("business"));
    }

    #[test]
    fn test_empty_default() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.first_mode_id(), None);
    }
}

use serde::{Deserialize, Serialize};

/// One of the six analysis dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Speed,
    Fonts,
    Images,
    Cta,
    Whitespace,
    SocialProof,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Speed,
        Section::Fonts,
        Section::Images,
        Section::Cta,
        Section::Whitespace,
        Section::SocialProof,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Speed => "Page Speed",
            Section::Fonts => "Fonts",
            Section::Images => "Images",
            Section::Cta => "Call to Action",
            Section::Whitespace => "Whitespace",
            Section::SocialProof => "Social Proof",
        }
    }

    /// Stable key matching the JSON field of `AnalysisResult`
    pub fn key(&self) -> &'static str {
        match self {
            Section::Speed => "speed",
            Section::Fonts => "fonts",
            Section::Images => "images",
            Section::Cta => "cta",
            Section::Whitespace => "whitespace",
            Section::SocialProof => "socialProof",
        }
    }

    /// Anchor id the rendering collaborator uses for the section
    pub fn anchor_id(&self) -> &'static str {
        match self {
            Section::Speed => "speed-section",
            Section::Fonts => "fonts-section",
            Section::Images => "images-section",
            Section::Cta => "cta-section",
            Section::Whitespace => "whitespace-section",
            Section::SocialProof => "social-proof-section",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Speed => "⚡",
            Section::Fonts => "🔤",
            Section::Images => "🖼️",
            Section::Cta => "🎯",
            Section::Whitespace => "📐",
            Section::SocialProof => "⭐",
        }
    }

    /// Importance weight used by priority ranking
    pub fn weight(&self) -> u8 {
        match self {
            Section::Cta => 25,
            Section::Speed => 25,
            Section::SocialProof => 20,
            Section::Whitespace => 15,
            Section::Images => 10,
            Section::Fonts => 5,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_100() {
        let total: u32 = Section::ALL.iter().map(|s| u32::from(s.weight())).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = Section::ALL.iter().map(|s| s.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 6);
    }
}

//! Predefined voice catalog
//!
//! Prebuilt voices offered by the Gemini speech models. Gender is only used to
//! group voices for display; it has no effect on synthesis.

use crate::{SpeechError, VoiceIdentifier};
use serde::{Deserialize, Serialize};

/// Sentence used to audition a voice
pub const PREVIEW_TEXT: &str = "Xin chào bạn, hy vọng giọng tôi sẽ phù hợp với bạn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Gender::Female, Gender::Male]
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Female => write!(f, "Female"),
            Gender::Male => write!(f, "Male"),
        }
    }
}

/// A selectable voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VoiceOption {
    pub name: &'static str,
    pub gender: Gender,
}

impl VoiceOption {
    const fn new(name: &'static str, gender: Gender) -> Self {
        Self { name, gender }
    }

    pub fn identifier(&self) -> VoiceIdentifier {
        VoiceIdentifier::new(self.name)
    }

    /// Get all catalog voices, female first
    pub fn all() -> &'static [VoiceOption] {
        &VOICE_OPTIONS
    }

    /// Voices of one gender in catalog order
    pub fn by_gender(gender: Gender) -> impl Iterator<Item = &'static VoiceOption> {
        VOICE_OPTIONS.iter().filter(move |v| v.gender == gender)
    }

    /// Case-insensitive lookup by name
    pub fn find(name: &str) -> Option<VoiceOption> {
        VOICE_OPTIONS
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .copied()
    }

    fn catalog_names() -> String {
        VOICE_OPTIONS
            .iter()
            .map(|v| v.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for VoiceOption {
    fn default() -> Self {
        VoiceOption::new("Sadachbia", Gender::Male)
    }
}

impl std::fmt::Display for VoiceOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::str::FromStr for VoiceOption {
    type Err = SpeechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VoiceOption::find(s)
            .ok_or_else(|| SpeechError::VoiceNotFound(s.to_string(), VoiceOption::catalog_names()))
    }
}

static VOICE_OPTIONS: [VoiceOption; 10] = [
    VoiceOption::new("Kore", Gender::Female),
    VoiceOption::new("Zephyr", Gender::Female),
    VoiceOption::new("Aoede", Gender::Female),
    VoiceOption::new("Leda", Gender::Female),
    VoiceOption::new("Vindemiatrix", Gender::Female),
    VoiceOption::new("Fenrir", Gender::Male),
    VoiceOption::new("Puck", Gender::Male),
    VoiceOption::new("Charon", Gender::Male),
    VoiceOption::new("Orus", Gender::Male),
    VoiceOption::new("Sadachbia", Gender::Male),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_split_evenly() {
        assert_eq!(VoiceOption::all().len(), 10);
        assert_eq!(VoiceOption::by_gender(Gender::Female).count(), 5);
        assert_eq!(VoiceOption::by_gender(Gender::Male).count(), 5);
    }

    #[test]
    fn test_default_voice() {
        let voice = VoiceOption::default();
        assert_eq!(voice.name, "Sadachbia");
        assert!(VoiceOption::all().contains(&voice));
    }

    #[test]
    fn test_voice_from_str() {
        assert_eq!("kore".parse::<VoiceOption>().unwrap().name, "Kore");
        assert_eq!("PUCK".parse::<VoiceOption>().unwrap().gender, Gender::Male);

        let err = "alba".parse::<VoiceOption>().unwrap_err();
        assert!(matches!(err, SpeechError::VoiceNotFound(ref name, _) if name == "alba"));
        assert!(err.to_string().contains("Vindemiatrix"));
    }

    #[test]
    fn test_by_gender_keeps_catalog_order() {
        let names: Vec<_> = VoiceOption::by_gender(Gender::Female)
            .map(|v| v.name)
            .collect();
        assert_eq!(names, ["Kore", "Zephyr", "Aoede", "Leda", "Vindemiatrix"]);
    }
}

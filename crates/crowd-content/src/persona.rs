use serde::{Deserialize, Serialize};

/// How a persona writes answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStyle {
    /// Lead-in label, e.g. "Security-first view:".
    pub voice: String,
    pub openers: Vec<String>,
    /// Sampled two at a time, without replacement.
    pub suggestions: Vec<String>,
    pub closer: String,
}

/// A persona's complete behavioral profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    /// Persona label, e.g. "Security-focused".
    pub persona: String,
    /// Free-text specialty sent as the registration description.
    pub specialty: String,
    /// Opening lines for questions.
    pub tones: Vec<String>,
    pub style: AnswerStyle,
}

impl BehaviorProfile {
    pub fn new(persona: &str, specialty: &str, tones: &[&str], style: AnswerStyle) -> Self {
        Self {
            persona: persona.to_string(),
            specialty: specialty.to_string(),
            tones: owned(tones),
            style,
        }
    }
}

impl AnswerStyle {
    pub fn new(voice: &str, openers: &[&str], suggestions: &[&str], closer: &str) -> Self {
        Self {
            voice: voice.to_string(),
            openers: owned(openers),
            suggestions: owned(suggestions),
            closer: closer.to_string(),
        }
    }
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

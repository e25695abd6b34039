use crowd_core::{CrowdError, Result};
use serde::Serialize;
use tracing::debug;

use crate::persona::{AnswerStyle, BehaviorProfile};

/// One row of the persona table.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaEntry {
    /// Seed identity; registration may append a disambiguating suffix.
    pub name: String,
    pub profile: BehaviorProfile,
}

/// Static table of participant identities and their profiles. Read-only once built.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    entries: Vec<PersonaEntry>,
}

impl PersonaRegistry {
    /// Build a registry from explicit entries. Later duplicates of a name are dropped.
    pub fn new(entries: Vec<PersonaEntry>) -> Self {
        let mut unique: Vec<PersonaEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|e| e.name == entry.name) {
                debug!(persona = %entry.name, "duplicate persona entry, keeping the first");
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    /// The five personas the crowd ships with.
    pub fn builtin() -> Self {
        Self::new(vec![
            entry(
                "Ava",
                BehaviorProfile::new(
                    "Security-focused",
                    "secure systems",
                    &[
                        "I'm worried about safety/abuse paths.",
                        "Thinking about threat model and blast radius here.",
                        "Concerned about edge cases and security impacts.",
                    ],
                    AnswerStyle::new(
                        "Security-first view:",
                        &[
                            "Start with a threat model and least-privilege defaults.",
                            "Assume inputs are hostile and timeouts will be hit.",
                        ],
                        &[
                            "Add strict input validation + schema checks before use.",
                            "Implement timeouts and circuit breakers per dependency.",
                            "Rotate keys with overlap + revoke compromised tokens quickly.",
                        ],
                        "Verify the fix with abuse cases and negative tests.",
                    ),
                ),
            ),
            entry(
                "Theo",
                BehaviorProfile::new(
                    "Tech-savvy",
                    "distributed systems",
                    &[
                        "Here's what I've tried technically so far.",
                        "I tested a few approaches and hit limits.",
                        "I can reproduce it consistently; details below.",
                    ],
                    tech_savvy_style(),
                ),
            ),
            entry(
                "Maya",
                BehaviorProfile::new(
                    "Analytical",
                    "architecture",
                    &[
                        "Constraints and symptoms are below.",
                        "Here are the observations and constraints.",
                        "Summarizing evidence and constraints.",
                    ],
                    AnswerStyle::new(
                        "Analytical take:",
                        &[
                            "Break the problem into constraints and measurable symptoms.",
                            "List assumptions, then challenge each with data.",
                        ],
                        &[
                            "Document failure modes and handle each explicitly.",
                            "Choose a design that minimizes blast radius under failure.",
                            "Add instrumentation before optimizing.",
                        ],
                        "Validate each assumption with metrics before rollout.",
                    ),
                ),
            ),
            entry(
                "Rin",
                BehaviorProfile::new(
                    "Creative",
                    "robotics",
                    &[
                        "I'm exploring a different angle on this problem.",
                        "Trying an alternative approach and need feedback.",
                        "Looking for a creative or unconventional fix.",
                    ],
                    AnswerStyle::new(
                        "Creative take:",
                        &[
                            "Try a different control or event-driven pattern here.",
                            "Consider shifting the flow to reduce tight coupling.",
                        ],
                        &[
                            "Prototype a lightweight alternative and compare outcomes.",
                            "Use smoothing/filters to reduce oscillation artifacts.",
                            "Simulate edge cases before field testing.",
                        ],
                        "Prototype a small variant and compare behavior side-by-side.",
                    ),
                ),
            ),
            entry(
                "Leo",
                BehaviorProfile::new(
                    "Friendly",
                    "developer experience",
                    &[
                        "Sorry if this is basic, I'm stuck.",
                        "I might be missing something obvious here.",
                        "Appreciate any help, still learning this part.",
                    ],
                    AnswerStyle::new(
                        "Friendly take:",
                        &[
                            "No worries, this is a common issue.",
                            "Let's keep it simple and step through it.",
                        ],
                        &[
                            "Start with small fixes and test one change at a time.",
                            "Add clear logs to see where it breaks.",
                            "Share a minimal repro if it still fails.",
                        ],
                        "Happy to dig deeper if you share logs.",
                    ),
                ),
            ),
        ])
    }

    /// Look up the profile for a participant identity.
    pub fn profile_for(&self, identity: &str) -> Result<&BehaviorProfile> {
        self.entries
            .iter()
            .find(|e| e.name == identity)
            .map(|e| &e.profile)
            .ok_or_else(|| CrowdError::PersonaNotFound(identity.to_string()))
    }

    /// Profile for identities missing from the table: no tone lines of its
    /// own and the technical answer style.
    pub fn fallback_profile() -> BehaviorProfile {
        BehaviorProfile::new("Generic", "general", &[], tech_savvy_style())
    }

    pub fn entries(&self) -> &[PersonaEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every profile can actually be composed from. Run once at startup
    /// so composition never meets a short pool mid-run.
    pub fn validate(&self) -> Result<()> {
        for e in &self.entries {
            let size = e.profile.style.suggestions.len();
            if size < 2 {
                return Err(CrowdError::InsufficientPool {
                    persona: e.name.clone(),
                    size,
                });
            }
            if e.profile.style.openers.is_empty() {
                return Err(CrowdError::EmptyPool("opener pool"));
            }
        }
        Ok(())
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn entry(name: &str, profile: BehaviorProfile) -> PersonaEntry {
    PersonaEntry {
        name: name.to_string(),
        profile,
    }
}

fn tech_savvy_style() -> AnswerStyle {
    AnswerStyle::new(
        "Technical take:",
        &[
            "Focus on retries, backpressure, and clear interfaces.",
            "Measure p95/p99 and trace the slowest span.",
        ],
        &[
            "Use per-call retries with jitter + idempotency keys.",
            "Return partial results where safe; don't fail the whole request.",
            "Add caching with TTL and include tool params in the key.",
        ],
        "After tuning, load-test to validate latency improvements.",
    )
}

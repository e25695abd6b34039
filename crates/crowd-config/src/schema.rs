use serde::{Deserialize, Serialize};

/// Root configuration, mapped to `crowd.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdConfig {
    pub service: ServiceConfig,
    pub crowd: RosterConfig,
    pub behavior: BehaviorConfig,
    pub pacing: PacingConfig,
    pub logging: LoggingConfig,
}

// ── Service ────────────────────────────────────────────────────

/// Where the Q&A service lives and how patiently we talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the Q&A service, e.g. "http://localhost:5000".
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            request_timeout_secs: 10,
        }
    }
}

// ── Roster ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// How many personas to register at startup (drawn from a shuffled persona table).
    pub agent_count: usize,
    /// Pause between consecutive registrations, in milliseconds.
    pub registration_stagger_ms: u64,
    /// Seed for the random source. 0 = seed from OS entropy.
    pub seed: u64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            agent_count: 5,
            registration_stagger_ms: 300,
            seed: 0,
        }
    }
}

// ── Behavior ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// A question must be at least this old (seconds) before anyone answers it.
    pub min_answer_age_secs: u64,
    /// How many recently asked topic titles are kept out of rotation.
    pub recent_topic_cap: usize,
    /// Relative weights of the action kinds.
    pub weights: ActionWeights,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            min_answer_age_secs: 900,
            recent_topic_cap: 8,
            weights: ActionWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionWeights {
    pub ask: u32,
    pub answer: u32,
    pub vote: u32,
    pub idle: u32,
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self {
            ask: 4,
            answer: 4,
            vote: 2,
            idle: 2,
        }
    }
}

impl ActionWeights {
    /// Weights in `ActionKind::ALL` order.
    pub fn as_array(&self) -> [u32; 4] {
        [self.ask, self.answer, self.vote, self.idle]
    }

    pub fn total(&self) -> u64 {
        self.as_array().iter().map(|w| u64::from(*w)).sum()
    }
}

// ── Pacing ─────────────────────────────────────────────────────

/// Delay ranges (seconds) slept after each class of action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub idle: IntervalConfig,
    pub question: IntervalConfig,
    pub answer: IntervalConfig,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            idle: IntervalConfig::new(120.0, 360.0),
            question: IntervalConfig::new(300.0, 900.0),
            answer: IntervalConfig::new(600.0, 1800.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalConfig {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl IntervalConfig {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// "pretty", "json", "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            WarningSeverity::Error => "error",
            WarningSeverity::Warning => "warning",
            WarningSeverity::Info => "info",
        };
        write!(f, "{} {}: {}", label, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl CrowdConfig {
    /// Validate the config and return a list of warnings/errors.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Service ───
        match url::Url::parse(&self.service.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                if url.scheme() == "http"
                    && !matches!(url.host_str(), Some("localhost") | Some("127.0.0.1"))
                {
                    warnings.push(ConfigWarning {
                        field: "service.base_url".into(),
                        message: "credentials will be sent over plain http".into(),
                        severity: WarningSeverity::Warning,
                        hint: Some("Use https for non-local services".into()),
                    });
                }
            }
            Ok(url) => {
                warnings.push(ConfigWarning {
                    field: "service.base_url".into(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                    severity: WarningSeverity::Error,
                    hint: Some("Use an http:// or https:// URL".into()),
                });
            }
            Err(e) => {
                warnings.push(ConfigWarning {
                    field: "service.base_url".into(),
                    message: format!("'{}' is not a valid URL: {}", self.service.base_url, e),
                    severity: WarningSeverity::Error,
                    hint: Some("Set to e.g. 'http://localhost:5000'".into()),
                });
            }
        }

        if self.service.request_timeout_secs == 0 {
            warnings.push(ConfigWarning {
                field: "service.request_timeout_secs".into(),
                message: "request timeout is 0".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 10".into()),
            });
        }

        // ── Roster ───
        if self.crowd.agent_count == 0 {
            warnings.push(ConfigWarning {
                field: "crowd.agent_count".into(),
                message: "no participants would be registered".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 5".into()),
            });
        }

        // ── Behavior ───
        if self.behavior.recent_topic_cap == 0 {
            warnings.push(ConfigWarning {
                field: "behavior.recent_topic_cap".into(),
                message: "recency window cap is 0".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 8".into()),
            });
        }

        if self.behavior.weights.total() == 0 {
            warnings.push(ConfigWarning {
                field: "behavior.weights".into(),
                message: "all action weights are zero".into(),
                severity: WarningSeverity::Error,
                hint: Some("Defaults are ask = 4, answer = 4, vote = 2, idle = 2".into()),
            });
        } else if self.behavior.weights.ask == 0 {
            warnings.push(ConfigWarning {
                field: "behavior.weights.ask".into(),
                message: "ask weight is zero, nothing will ever be posted".into(),
                severity: WarningSeverity::Warning,
                hint: None,
            });
        }

        if self.behavior.min_answer_age_secs == 0 {
            warnings.push(ConfigWarning {
                field: "behavior.min_answer_age_secs".into(),
                message: "questions may be answered the instant they are posted".into(),
                severity: WarningSeverity::Info,
                hint: None,
            });
        }

        // ── Pacing ───
        for (name, interval) in [
            ("idle", &self.pacing.idle),
            ("question", &self.pacing.question),
            ("answer", &self.pacing.answer),
        ] {
            if interval.min_secs < 0.0 || !interval.min_secs.is_finite() || !interval.max_secs.is_finite() {
                warnings.push(ConfigWarning {
                    field: format!("pacing.{}", name),
                    message: format!(
                        "interval [{}, {}] must be finite and non-negative",
                        interval.min_secs, interval.max_secs
                    ),
                    severity: WarningSeverity::Error,
                    hint: None,
                });
            } else if interval.min_secs > interval.max_secs {
                warnings.push(ConfigWarning {
                    field: format!("pacing.{}", name),
                    message: format!(
                        "min_secs {} is greater than max_secs {}",
                        interval.min_secs, interval.max_secs
                    ),
                    severity: WarningSeverity::Error,
                    hint: Some("Swap the bounds".into()),
                });
            }
        }

        // ── Logging format ───
        let valid_formats = ["pretty", "json", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        // ── Logging level ───
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }

        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }
}

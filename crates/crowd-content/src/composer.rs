use crowd_core::random::{choose, sample_two_distinct};
use crowd_core::{CrowdError, RandomSource, Result, TopicItem};
use tracing::debug;

use crate::persona::BehaviorProfile;
use crate::registry::PersonaRegistry;
use crate::topics::{CLOSING_PROMPTS, GENERIC_TONE, TopicPool, tips_for};

/// Supplies topics and post bodies to the scheduler.
pub trait ContentProvider: Send + Sync {
    /// The full seed pool, in a stable order.
    fn topics(&self) -> &[TopicItem];

    /// Question body for `identity` asking about `topic`.
    fn compose_ask(
        &self,
        identity: &str,
        topic: &TopicItem,
        rng: &mut dyn RandomSource,
    ) -> Result<String>;

    /// Answer body for `identity` replying to a question derived from `topic`.
    fn compose_answer(
        &self,
        identity: &str,
        topic: &TopicItem,
        rng: &mut dyn RandomSource,
    ) -> Result<String>;
}

/// Template-driven content from a persona registry and a topic pool.
///
/// Identities the registry does not know are written with
/// [`PersonaRegistry::fallback_profile`].
#[derive(Debug, Clone)]
pub struct TemplateContent {
    registry: PersonaRegistry,
    pool: TopicPool,
    fallback: BehaviorProfile,
}

impl TemplateContent {
    pub fn new(registry: PersonaRegistry, pool: TopicPool) -> Self {
        Self {
            registry,
            pool,
            fallback: PersonaRegistry::fallback_profile(),
        }
    }

    fn profile(&self, identity: &str) -> &BehaviorProfile {
        match self.registry.profile_for(identity) {
            Ok(profile) => profile,
            Err(_) => {
                debug!(persona = %identity, "unknown persona, using fallback profile");
                &self.fallback
            }
        }
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    pub fn pool(&self) -> &TopicPool {
        &self.pool
    }
}

impl Default for TemplateContent {
    fn default() -> Self {
        Self::new(PersonaRegistry::builtin(), TopicPool::builtin())
    }
}

impl ContentProvider for TemplateContent {
    fn topics(&self) -> &[TopicItem] {
        self.pool.items()
    }

    fn compose_ask(
        &self,
        identity: &str,
        topic: &TopicItem,
        rng: &mut dyn RandomSource,
    ) -> Result<String> {
        Ok(compose_ask(self.profile(identity), topic, rng))
    }

    fn compose_answer(
        &self,
        identity: &str,
        topic: &TopicItem,
        rng: &mut dyn RandomSource,
    ) -> Result<String> {
        compose_answer(self.profile(identity), topic, rng)
    }
}

/// `{tone}\n{topic body}\n{closing prompt}`.
///
/// Draws: one index for the tone, one for the closing prompt.
pub fn compose_ask(profile: &BehaviorProfile, topic: &TopicItem, rng: &mut dyn RandomSource) -> String {
    let tone = choose(rng, &profile.tones)
        .map(String::as_str)
        .unwrap_or(GENERIC_TONE);
    let prompt = choose(rng, &CLOSING_PROMPTS).copied().unwrap_or(CLOSING_PROMPTS[0]);
    format!("{}\n{}\n{}", tone, topic.body, prompt)
}

/// `{voice} {opener}\n- {tip}\n- {s1}\n- {s2}\nNext step: {closer}`.
///
/// Draws: opener index, tip index, then two suggestion indices sampled
/// without replacement. Unknown topic categories use the default tips.
pub fn compose_answer(
    profile: &BehaviorProfile,
    topic: &TopicItem,
    rng: &mut dyn RandomSource,
) -> Result<String> {
    let style = &profile.style;
    let size = style.suggestions.len();
    if size < 2 {
        return Err(CrowdError::InsufficientPool {
            persona: profile.persona.clone(),
            size,
        });
    }

    let opener = choose(rng, &style.openers).ok_or(CrowdError::EmptyPool("opener pool"))?;
    let tip = choose(rng, tips_for(topic.resolved_category()))
        .copied()
        .ok_or(CrowdError::EmptyPool("tip pool"))?;
    let (first, second) =
        sample_two_distinct(rng, size).ok_or(CrowdError::EmptyPool("suggestion pool"))?;

    Ok(format!(
        "{} {}\n- {}\n- {}\n- {}\nNext step: {}",
        style.voice, opener, tip, style.suggestions[first], style.suggestions[second], style.closer
    ))
}

//! # Behavioral scheduler
//!
//! One iteration of the crowd's life: draw an action kind, resolve it against
//! what has been posted so far, perform at most one remote call, record the
//! result, and pick how long to wait before the next iteration.
//!
//! [`Scheduler::step`] never sleeps. The returned [`StepOutcome`] carries the
//! delay, and the [`driver`](crate::driver) does the waiting. Given the same
//! random draws, clock readings and service replies, a sequence of steps is
//! fully reproducible.
//!
//! Draw order within one iteration is fixed: action weight, participant,
//! target or topic, vote direction, composition, pacing delay.

use chrono::Duration as AgeDuration;
use crowd_client::QaService;
use crowd_config::CrowdConfig;
use crowd_content::ContentProvider;
use crowd_core::random::{choose, weighted_index};
use crowd_core::{
    ActionKind, Clock, CrowdError, Participant, RandomSource, Result, StdRandom, SystemClock,
    TargetKind, VoteDirection,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::memory::{ActivityMemory, PostedAnswer, PostedQuestion};
use crate::pacing::{PaceClass, PacingPolicy};
use crate::recency::{RecencyWindow, pick_topic};
use crate::stats::ActivityStats;

/// Tunables the scheduler reads every iteration.
#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    /// Weights in [`ActionKind::ALL`] order.
    pub weights: [u32; 4],
    pub min_answer_age: AgeDuration,
    pub recent_topic_cap: usize,
    pub pacing: PacingPolicy,
}

impl SchedulerSettings {
    pub fn from_config(config: &CrowdConfig) -> Self {
        let secs = i64::try_from(config.behavior.min_answer_age_secs).unwrap_or(i64::MAX);
        Self {
            weights: config.behavior.weights.as_array(),
            min_answer_age: AgeDuration::try_seconds(secs).unwrap_or(AgeDuration::MAX),
            recent_topic_cap: config.behavior.recent_topic_cap,
            pacing: PacingPolicy::from_config(&config.pacing),
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self::from_config(&CrowdConfig::default())
    }
}

/// Why an action kind was drawn but nothing was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No posted question is old enough to answer.
    NoEligibleQuestion,
    /// The drawn participant wrote the drawn question.
    SelfAnswer,
    /// Nothing has been posted yet.
    NothingToVoteOn,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoEligibleQuestion => "no_eligible_question",
            SkipReason::SelfAnswer => "self_answer",
            SkipReason::NothingToVoteOn => "nothing_to_vote_on",
        }
    }
}

/// What an iteration actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Performed {
    Asked {
        participant: String,
        question_id: String,
        title: String,
    },
    Answered {
        participant: String,
        question_id: String,
        answer_id: String,
    },
    Voted {
        participant: String,
        target: TargetKind,
        target_id: String,
        direction: VoteDirection,
    },
    Skipped(SkipReason),
    Idle,
}

impl Performed {
    pub fn pace_class(&self) -> PaceClass {
        match self {
            Performed::Asked { .. } => PaceClass::Question,
            Performed::Answered { .. } => PaceClass::Answer,
            Performed::Voted { .. } | Performed::Skipped(_) | Performed::Idle => PaceClass::Idle,
        }
    }
}

/// Result of one [`Scheduler::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The action kind drawn from the weights.
    pub action: ActionKind,
    pub performed: Performed,
    pub pace: PaceClass,
    /// How long to wait before the next step.
    pub delay: Duration,
}

/// Owns the roster and everything the crowd remembers about its own posts.
pub struct Scheduler {
    participants: Vec<Participant>,
    memory: ActivityMemory,
    recent: RecencyWindow,
    stats: ActivityStats,
    settings: SchedulerSettings,
    service: Arc<dyn QaService>,
    content: Arc<dyn ContentProvider>,
    rng: Box<dyn RandomSource>,
    clock: Arc<dyn Clock>,
}

impl Scheduler {
    /// Fails when there is nobody to act, nothing to ask about, or no action
    /// with a non-zero weight.
    pub fn new(
        participants: Vec<Participant>,
        service: Arc<dyn QaService>,
        content: Arc<dyn ContentProvider>,
        settings: SchedulerSettings,
    ) -> Result<Self> {
        if participants.is_empty() {
            return Err(CrowdError::EmptyPool("participant roster"));
        }
        if content.topics().is_empty() {
            return Err(CrowdError::EmptyPool("topic pool"));
        }
        if settings.weights.iter().all(|w| *w == 0) {
            return Err(CrowdError::ConfigValidation {
                field: "behavior.weights".into(),
                reason: "all action weights are zero".into(),
            });
        }
        Ok(Self {
            participants,
            memory: ActivityMemory::new(),
            recent: RecencyWindow::new(settings.recent_topic_cap),
            stats: ActivityStats::default(),
            settings,
            service,
            content,
            rng: Box::new(StdRandom::from_entropy()),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn memory(&self) -> &ActivityMemory {
        &self.memory
    }

    pub fn recent(&self) -> &RecencyWindow {
        &self.recent
    }

    pub fn stats(&self) -> ActivityStats {
        self.stats
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    /// Run one iteration.
    ///
    /// On error nothing is recorded in memory and the failure is counted;
    /// the caller decides how long to wait (see [`idle_delay`](Self::idle_delay)).
    pub async fn step(&mut self) -> Result<StepOutcome> {
        let action = self.select_action();
        let result = match action {
            ActionKind::Ask => self.ask().await,
            ActionKind::Answer => self.answer().await,
            ActionKind::Vote => self.vote().await,
            ActionKind::Idle => Ok(Performed::Idle),
        };

        let performed = match result {
            Ok(performed) => performed,
            Err(e) => {
                self.stats.record_failure();
                return Err(e);
            }
        };

        if let Performed::Skipped(reason) = &performed {
            debug!(action = %action, reason = reason.as_str(), "nothing to do this iteration");
        }

        let pace = performed.pace_class();
        let delay = self.settings.pacing.delay(pace, &mut *self.rng);
        self.stats.record(&performed);
        Ok(StepOutcome {
            action,
            performed,
            pace,
            delay,
        })
    }

    /// A fresh idle-class delay, used after a failed iteration.
    pub fn idle_delay(&mut self) -> Duration {
        self.settings.pacing.delay(PaceClass::Idle, &mut *self.rng)
    }

    fn select_action(&mut self) -> ActionKind {
        weighted_index(&mut *self.rng, &self.settings.weights)
            .map(|i| ActionKind::ALL[i])
            .unwrap_or(ActionKind::Idle)
    }

    fn pick_participant(&mut self) -> Result<Participant> {
        choose(&mut *self.rng, &self.participants)
            .cloned()
            .ok_or(CrowdError::EmptyPool("participant roster"))
    }

    async fn ask(&mut self) -> Result<Performed> {
        let participant = self.pick_participant()?;
        let content = Arc::clone(&self.content);
        let pick = pick_topic(content.topics(), &self.recent, &mut *self.rng)
            .ok_or(CrowdError::EmptyPool("topic pool"))?;
        let topic = pick.topic;
        let body = content.compose_ask(&participant.persona, topic, &mut *self.rng)?;

        let created = self
            .service
            .create_question(&participant.credential, &topic.title, &body, &topic.tags)
            .await?;

        info!(participant = %participant.name, id = %created.id, title = %created.title, "asked question");
        self.memory.record_question(PostedQuestion {
            id: created.id.clone(),
            topic: topic.clone(),
            created_at: self.clock.now(),
            author: participant.name.clone(),
        });
        self.recent.commit(&pick);

        Ok(Performed::Asked {
            participant: participant.name,
            question_id: created.id,
            title: created.title,
        })
    }

    async fn answer(&mut self) -> Result<Performed> {
        let now = self.clock.now();
        let eligible: Vec<PostedQuestion> = self
            .memory
            .eligible_for_answer(now, self.settings.min_answer_age)
            .into_iter()
            .cloned()
            .collect();
        if eligible.is_empty() {
            return Ok(Performed::Skipped(SkipReason::NoEligibleQuestion));
        }

        let participant = self.pick_participant()?;
        let target = choose(&mut *self.rng, &eligible)
            .cloned()
            .ok_or(CrowdError::EmptyPool("eligible questions"))?;
        if target.author == participant.name {
            return Ok(Performed::Skipped(SkipReason::SelfAnswer));
        }

        let body = self
            .content
            .compose_answer(&participant.persona, &target.topic, &mut *self.rng)?;
        let created = self
            .service
            .create_answer(&participant.credential, &target.id, &body)
            .await?;

        info!(participant = %participant.name, question = %target.id, id = %created.id, "answered question");
        self.memory.record_answer(PostedAnswer {
            id: created.id.clone(),
            question_id: target.id.clone(),
            created_at: now,
            author: participant.name.clone(),
        });

        Ok(Performed::Answered {
            participant: participant.name,
            question_id: target.id,
            answer_id: created.id,
        })
    }

    async fn vote(&mut self) -> Result<Performed> {
        let (target, ids): (TargetKind, Vec<String>) = match self.memory.vote_targets() {
            Some((kind, ids)) => (kind, ids.into_iter().map(str::to_string).collect()),
            None => return Ok(Performed::Skipped(SkipReason::NothingToVoteOn)),
        };

        let participant = self.pick_participant()?;
        let target_id = choose(&mut *self.rng, &ids)
            .cloned()
            .ok_or(CrowdError::EmptyPool("vote targets"))?;
        let direction = *choose(&mut *self.rng, &VoteDirection::ALL).unwrap_or(&VoteDirection::Up);

        self.service
            .vote(&participant.credential, &target_id, target, direction)
            .await?;

        info!(participant = %participant.name, target = %target, id = %target_id, direction = %direction, "voted");
        Ok(Performed::Voted {
            participant: participant.name,
            target,
            target_id,
            direction,
        })
    }
}

//! # crowd-content
//!
//! Everything a participant says. The persona registry maps identities to
//! behavioral profiles, the topic pool holds the seed questions, and the
//! composer turns (profile, topic, random draws) into post bodies.
//!
//! Composition is a pure function of its inputs: the same profile, topic and
//! draw sequence always produce the same text.

pub mod composer;
pub mod persona;
pub mod registry;
pub mod topics;

pub use composer::{ContentProvider, TemplateContent, compose_answer, compose_ask};
pub use persona::{AnswerStyle, BehaviorProfile};
pub use registry::{PersonaEntry, PersonaRegistry};
pub use topics::TopicPool;

use crowd_client::QaService;
use crowd_config::schema::RosterConfig;
use crowd_content::{PersonaEntry, PersonaRegistry};
use crowd_core::random::shuffle;
use crowd_core::{CrowdError, Participant, RandomSource, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Register the startup roster.
///
/// Shuffles the persona table, takes `agent_count` entries (clamped to the
/// table size) and registers them one after another, pausing
/// `registration_stagger_ms` between calls. A name conflict is retried once
/// with a random four-digit suffix; any other failure, or a second conflict,
/// aborts startup.
pub async fn register_roster(
    service: &dyn QaService,
    registry: &PersonaRegistry,
    config: &RosterConfig,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Participant>> {
    if registry.is_empty() {
        return Err(CrowdError::EmptyPool("persona table"));
    }

    let mut entries: Vec<&PersonaEntry> = registry.entries().iter().collect();
    shuffle(rng, &mut entries);

    let count = if config.agent_count > entries.len() {
        warn!(
            requested = config.agent_count,
            available = entries.len(),
            "agent count exceeds persona table, clamping"
        );
        entries.len()
    } else {
        config.agent_count
    };

    info!(service = service.name(), count, "registering roster");
    let stagger = Duration::from_millis(config.registration_stagger_ms);
    let mut participants = Vec::with_capacity(count);
    for (i, entry) in entries.into_iter().take(count).enumerate() {
        if i > 0 && !stagger.is_zero() {
            tokio::time::sleep(stagger).await;
        }
        let participant = register_one(service, entry, rng).await?;
        info!(
            participant = %participant.name,
            persona = %entry.profile.persona,
            "registered participant"
        );
        participants.push(participant);
    }
    Ok(participants)
}

async fn register_one(
    service: &dyn QaService,
    entry: &PersonaEntry,
    rng: &mut dyn RandomSource,
) -> Result<Participant> {
    let description = entry.profile.specialty.as_str();
    let registration = match service.register(&entry.name, description).await {
        Ok(reg) => reg,
        Err(CrowdError::RegistrationConflict(_)) => {
            let alternate = format!("{}-{}", entry.name, 1000 + rng.index(9000));
            warn!(name = %entry.name, retry = %alternate, "name taken, retrying with suffix");
            service.register(&alternate, description).await?
        }
        Err(e) => return Err(e),
    };
    Ok(Participant::new(
        registration.name,
        entry.name.clone(),
        registration.credential,
    ))
}

use crowd_client::{MockQaService, RecordedCall};
use crowd_config::schema::RosterConfig;
use crowd_content::PersonaRegistry;
use crowd_core::{CrowdError, ScriptedRandom, StdRandom};
use crowd_runtime::register_roster;

fn config(agent_count: usize) -> RosterConfig {
    RosterConfig {
        agent_count,
        registration_stagger_ms: 0,
        seed: 0,
    }
}

fn only_ava() -> PersonaRegistry {
    let builtin = PersonaRegistry::builtin();
    PersonaRegistry::new(vec![builtin.entries()[0].clone()])
}

#[tokio::test]
async fn test_registers_requested_count() {
    let service = MockQaService::new();
    let registry = PersonaRegistry::builtin();
    let roster = register_roster(&service, &registry, &config(3), &mut StdRandom::seeded(1))
        .await
        .unwrap();

    assert_eq!(roster.len(), 3);
    for p in &roster {
        assert_eq!(p.name, p.persona);
        assert_eq!(p.credential, format!("key-{}", p.name.to_lowercase()));
        assert!(registry.profile_for(&p.persona).is_ok());
    }
    let mut names: Vec<&str> = roster.iter().map(|p| p.name.as_str()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 3);
}

#[tokio::test]
async fn test_registration_sends_specialty() {
    let service = MockQaService::new();
    register_roster(&service, &only_ava(), &config(1), &mut ScriptedRandom::new())
        .await
        .unwrap();
    assert_eq!(
        service.calls(),
        vec![RecordedCall::Register {
            name: "Ava".into(),
            description: "secure systems".into(),
        }]
    );
}

#[tokio::test]
async fn test_agent_count_clamped_to_table() {
    let service = MockQaService::new();
    let roster = register_roster(
        &service,
        &PersonaRegistry::builtin(),
        &config(12),
        &mut StdRandom::seeded(3),
    )
    .await
    .unwrap();
    assert_eq!(roster.len(), 5);
}

#[tokio::test]
async fn test_conflict_retries_once_with_suffix() {
    let service = MockQaService::new().with_taken_name("Ava");
    let mut rng = ScriptedRandom::new().with_indices([234]);
    let roster = register_roster(&service, &only_ava(), &config(1), &mut rng)
        .await
        .unwrap();

    assert_eq!(roster[0].name, "Ava-1234");
    assert_eq!(roster[0].persona, "Ava");
    assert_eq!(service.call_count(), 2);
}

#[tokio::test]
async fn test_suffix_stays_four_digits() {
    for seed in 0..20 {
        let service = MockQaService::new().with_taken_name("Ava");
        let roster = register_roster(&service, &only_ava(), &config(1), &mut StdRandom::seeded(seed))
            .await
            .unwrap();
        let suffix: u32 = roster[0].name.trim_start_matches("Ava-").parse().unwrap();
        assert!((1000..=9999).contains(&suffix));
    }
}

#[tokio::test]
async fn test_second_conflict_is_fatal() {
    let service = MockQaService::new()
        .with_taken_name("Ava")
        .with_taken_name("Ava-1234");
    let mut rng = ScriptedRandom::new().with_indices([234]);
    let err = register_roster(&service, &only_ava(), &config(1), &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(err, CrowdError::RegistrationConflict(ref n) if n == "Ava-1234"));
}

#[tokio::test]
async fn test_transport_failure_is_fatal() {
    let service = MockQaService::new().with_failure(CrowdError::Transport("refused".into()));
    let err = register_roster(&service, &only_ava(), &config(1), &mut ScriptedRandom::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CrowdError::Transport(_)));
    assert_eq!(service.call_count(), 1, "no retry for non-conflict failures");
}

#[tokio::test]
async fn test_empty_table_rejected() {
    let err = register_roster(
        &MockQaService::new(),
        &PersonaRegistry::new(vec![]),
        &config(1),
        &mut ScriptedRandom::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CrowdError::EmptyPool(_)));
}

use console::style;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crowd_client::{HttpQaClient, QaService};
use crowd_config::CrowdConfig;
use crowd_content::{PersonaRegistry, TemplateContent, TopicPool};
use crowd_core::StdRandom;
use crowd_runtime::{Scheduler, SchedulerSettings, driver, register_roster};

pub(super) async fn cmd_run(config: CrowdConfig, iterations: Option<u64>) -> crowd_core::Result<()> {
    println!("👥 Crowd v{}", env!("CARGO_PKG_VERSION"));
    println!("   Service: {}", config.service.base_url);
    println!("   Participants: {}", config.crowd.agent_count);
    if let Some(n) = iterations {
        println!("   Iterations: {n}");
    }
    println!();

    let registry = PersonaRegistry::builtin();
    registry.validate()?;
    let content = TemplateContent::new(registry.clone(), TopicPool::builtin());

    let client = HttpQaClient::new(
        &config.service.base_url,
        Duration::from_secs(config.service.request_timeout_secs),
    )?;
    let service: Arc<dyn QaService> = Arc::new(client);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            trigger.cancel();
        }
    });

    let mut rng = StdRandom::from_config_seed(config.crowd.seed);
    let participants = tokio::select! {
        _ = cancel.cancelled() => return Ok(()),
        roster = register_roster(service.as_ref(), &registry, &config.crowd, &mut rng) => roster?,
    };
    for p in &participants {
        println!("   {} {} ({})", style("✓").green(), p.name, p.persona);
    }
    println!();

    let mut scheduler = Scheduler::new(
        participants,
        service,
        Arc::new(content),
        SchedulerSettings::from_config(&config),
    )?
    .with_random(Box::new(rng));

    let stats = driver::run(&mut scheduler, cancel, iterations).await;

    println!();
    println!(
        "   {} asks, {} answers, {} votes, {} idle, {} skipped, {} failed",
        stats.asks, stats.answers, stats.votes, stats.idles, stats.skipped, stats.failed
    );
    Ok(())
}

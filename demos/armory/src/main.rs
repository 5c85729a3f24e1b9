use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use components::Factory;
use spark_blueprint::{Blueprint, BlueprintRegistry};
use spark_event::{EventKind, EventPayload, EventPool, PooledEvent, Target};
use spark_world::{World, WorldConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "armory", about = "Build a weapon from a blueprint file and swing it")]
struct Args {
    /// Blueprint file to load
    #[arg(short, long, default_value = "objects.blpt")]
    blueprints: PathBuf,

    /// Name of the blueprint to build
    #[arg(short, long, default_value = "Sword")]
    object: String,

    /// Number of pooled event containers (defaults to the world config)
    #[arg(long)]
    pool_size: Option<usize>,

    /// Seed for the dice; omit for a random seed
    #[arg(long)]
    seed: Option<u64>,

    /// How many times to swing
    #[arg(long, default_value_t = 3)]
    swings: u32,

    /// Print the loaded blueprints as JSON and exit
    #[arg(long)]
    dump_json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let mut registry = BlueprintRegistry::new();
    registry
        .load_file(&args.blueprints)
        .with_context(|| format!("loading {}", args.blueprints.display()))?;

    if args.dump_json {
        let blueprints: Vec<&Blueprint> = registry
            .names()
            .into_iter()
            .filter_map(|name| registry.get(name))
            .collect();
        println!("{}", serde_json::to_string_pretty(&blueprints)?);
        return Ok(());
    }

    println!("armory v{}", env!("CARGO_PKG_VERSION"));
    print_blueprints(&registry);

    let mut config = WorldConfig::default();
    if let Some(size) = args.pool_size {
        config = config.with_event_pool_capacity(size);
    }
    let mut world = World::new(config);
    let pool = EventPool::new(world.config().event_pool_capacity);
    Factory::register_components(&mut world);

    let mut factory = match args.seed {
        Some(seed) => Factory::seeded(seed),
        None => Factory::new(),
    };
    let blueprint = registry
        .get(&args.object)
        .with_context(|| format!("no blueprint named {:?}", args.object))?;
    let weapon = factory.build(&mut world, blueprint)?;
    info!(entity = %weapon, object = %args.object, "weapon built");

    let looked_at = request(&mut world, &pool, weapon, EventKind::GetRenderData)?;
    if let Some(render) = looked_at.render_data() {
        println!();
        println!("{} {}: {}", render.symbol, render.name, render.description);
    }
    looked_at.release();

    for swing in 1..=args.swings {
        let event = request(&mut world, &pool, weapon, EventKind::DealDamage)?;

        let Some(deal) = event.deal_damage() else {
            continue;
        };
        let rolls: Vec<String> = deal
            .damage
            .iter()
            .map(|d| format!("{} {}", d.amount, d.damage_type))
            .collect();
        println!("swing {swing}: {} ({} total)", rolls.join(" + "), deal.total());
    }

    info!(
        available = pool.available(),
        capacity = pool.capacity(),
        "event pool settled"
    );
    Ok(())
}

/// Submits an empty `kind` event to `target` and returns the pooled
/// container holding whatever the listeners wrote into it.
fn request<'p>(
    world: &mut World,
    pool: &'p EventPool,
    target: impl Into<Target>,
    kind: EventKind,
) -> Result<PooledEvent<'p>> {
    let mut event = pool.acquire()?;
    event.set(target, EventPayload::empty(kind));
    world.submit(&mut event);
    Ok(event)
}

fn print_blueprints(registry: &BlueprintRegistry) {
    for name in registry.names() {
        let Some(blueprint) = registry.get(name) else {
            continue;
        };
        println!("{name}");
        for component in &blueprint.components {
            let arguments: Vec<String> = component
                .arguments
                .iter()
                .map(|(k, v)| format!("{k}={v:?}"))
                .collect();
            println!("  {} {}", component.name, arguments.join(" "));
        }
        if !blueprint.listen_for_events.is_empty() {
            println!("  listens: {}", blueprint.listen_for_events.join(", "));
        }
    }
}

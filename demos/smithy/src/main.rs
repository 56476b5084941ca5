//! Smithy - Try reactions from the command line
//!
//! Loads a content directory into in-memory ports, stocks one actor and
//! runs a reaction a number of times with a seeded random source.
//!
//! ```text
//! smithy demos/smithy/content --reaction smelt_iron --item ore:6 --item coal:3 \
//!     --knows masterSmith --tool bellows:70 --attempts 3
//! ```

use alembic_core::{
    ActorId, EngineConfig, KnowledgeKey, KnowledgePort, Quantity, ReactionContext, ReactionEngine,
    ReactionId, SeededRandom, ToolInstance,
};
use alembic_memory::{MemoryInventory, MemoryKnowledge, MemoryRepository, MemoryTooling};
use alembic_script::Loader;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ACTOR: ActorId = ActorId(1);

#[derive(Parser, Debug)]
#[command(name = "smithy")]
#[command(about = "Run alembic reactions against an in-memory actor")]
struct Cli {
    /// Directory of reaction scripts
    content: PathBuf,

    /// Engine configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reaction to attempt
    #[arg(long, default_value = "smelt_iron")]
    reaction: String,

    /// Number of attempts
    #[arg(long, default_value = "1")]
    attempts: u32,

    /// Seed for the random source
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Station the actor is working at
    #[arg(long, default_value = "forge")]
    station: String,

    /// Knowledge the actor holds
    #[arg(long = "knows")]
    knowledge: Vec<String>,

    /// Tools as tag:quality, e.g. anvil:80
    #[arg(long = "tool", value_parser = parse_tool)]
    tools: Vec<ToolInstance>,

    /// Starting items as item:amount, e.g. ore:4
    #[arg(long = "item", value_parser = parse_quantity)]
    items: Vec<Quantity>,
}

fn split_pair(s: &str) -> Result<(&str, &str), String> {
    s.split_once(':')
        .ok_or_else(|| format!("expected name:number, got '{}'", s))
}

fn parse_tool(s: &str) -> Result<ToolInstance, String> {
    let (tag, quality) = split_pair(s)?;
    let quality = quality.parse::<i32>().map_err(|e| e.to_string())?;
    ToolInstance::of(tag, quality).map_err(|e| e.to_string())
}

fn parse_quantity(s: &str) -> Result<Quantity, String> {
    let (item, amount) = split_pair(s)?;
    let amount = amount.parse::<i64>().map_err(|e| e.to_string())?;
    Quantity::of(item, amount).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smithy=info,alembic_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let mut loader = Loader::new();
    loader.load_directory(&cli.content)?;
    let reactions = loader.finish();
    info!("Loaded {} reactions from {}", reactions.len(), cli.content.display());

    let repository = Arc::new(MemoryRepository::with_definitions(reactions)?);
    let knowledge = Arc::new(MemoryKnowledge::new());
    let tooling = Arc::new(MemoryTooling::new());
    let inventory = Arc::new(MemoryInventory::new());

    for key in &cli.knowledge {
        knowledge.grant(ACTOR, KnowledgeKey::new(key)?).await?;
    }
    for tool in cli.tools {
        tooling.equip(ACTOR, tool)?;
    }
    for item in cli.items {
        inventory.deposit(ACTOR, item)?;
    }

    let engine = ReactionEngine::new(
        repository,
        knowledge,
        tooling,
        inventory.clone(),
        Arc::new(SeededRandom::new(cli.seed)),
    )
    .with_config(config);

    let reaction = ReactionId::new(cli.reaction);
    let context = ReactionContext::new().with("station", cli.station);

    let feasibility = engine.preview(&reaction, ACTOR, &context).await?;
    info!(
        "{}: can_execute={} chance={:.2} duration={:?}",
        reaction, feasibility.can_execute, feasibility.success_chance, feasibility.duration
    );

    for attempt in 1..=cli.attempts {
        let result = engine.execute(&reaction, ACTOR, &context).await?;
        let produced: Vec<String> = result.produced.iter().map(ToString::to_string).collect();
        info!(
            "attempt {}: {:?} roll={:?} produced=[{}]",
            attempt,
            result.outcome,
            result.roll,
            produced.join(", ")
        );
        for note in &result.notes {
            info!("  {}", note);
        }
    }

    let holdings: Vec<String> = inventory
        .holdings(ACTOR)?
        .iter()
        .map(ToString::to_string)
        .collect();
    info!("inventory: [{}]", holdings.join(", "));
    Ok(())
}

use anyhow::{Context, Result};
use hotbar_keeper::{
    bot::{demo_inventory, SimAgent},
    config::{ConfigLoader, SettingsStore},
    control::ChatControl,
    inventory::{Inventory, InventoryController},
    logging::init_logger,
    state::MoveState,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// What the tick loop last reported
#[derive(Debug, Clone, Copy, Default)]
struct TickStatus {
    tick: u64,
    state: MoveState,
    ticks_since_last_move: u32,
}

fn load_snapshot(path: &str) -> Result<Inventory> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory snapshot {}", path))?;
    let inventory: Inventory = serde_json::from_str(&contents)
        .context("Failed to parse inventory snapshot")?;
    Ok(inventory.normalized())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    info!("Starting hotbar_keeper v{}", VERSION);

    let config_loader = ConfigLoader::new();
    let settings = config_loader.load()?;
    if !settings.allow_inventory {
        info!("allow_inventory is off; type `#allow_inventory` to turn it on");
    }
    let store = SettingsStore::new(settings);

    let inventory = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading inventory snapshot from {}", path);
            load_snapshot(&path)?
        }
        None => demo_inventory(),
    };

    let status = Arc::new(RwLock::new(TickStatus::default()));

    // Tick loop: one controller evaluation per simulation tick
    let tick_store = store.clone();
    let tick_status = status.clone();
    tokio::spawn(async move {
        let mut agent = SimAgent::new(inventory);
        let mut controller = InventoryController::new();
        let mut ticker = interval(TICK_INTERVAL);
        let mut tick: u64 = 0;
        let mut swaps_seen = 0;

        loop {
            ticker.tick().await;
            tick += 1;

            let settings = tick_store.snapshot();
            controller.on_tick(&mut agent, &settings);

            if agent.swaps().len() > swaps_seen {
                for swap in &agent.swaps()[swaps_seen..] {
                    info!("Tick {}: moved slot {} to hotbar {}", tick, swap.from, swap.to);
                }
                swaps_seen = agent.swaps().len();
            }

            *tick_status.write() = TickStatus {
                tick,
                state: controller.state(),
                ticks_since_last_move: controller.ticks_since_last_move(),
            };
        }
    });

    let mut control = ChatControl::new(store.clone());
    let status_for_command = status.clone();
    control.register(
        "status",
        Box::new(move |_: &ChatControl, _: &[String]| {
            let status = *status_for_command.read();
            match status.state.pending() {
                Some(request) => info!(
                    "Tick {}: waiting to move slot {} to hotbar {} ({} ticks since last move)",
                    status.tick, request.from, request.to, status.ticks_since_last_move
                ),
                None => info!(
                    "Tick {}: idle ({} ticks since last move)",
                    status.tick, status.ticks_since_last_move
                ),
            }
            Ok(())
        }),
    );
    control.register(
        "save",
        Box::new(|control: &ChatControl, _: &[String]| {
            ConfigLoader::new().save(&control.store().snapshot())
        }),
    );

    info!("Console ready - type `#help` for commands, `#<setting>` to toggle, `#<setting> <value>` to set, `#!` to force a command");

    tokio::spawn(async move {
        use tokio::io::{stdin, AsyncBufReadExt, BufReader};

        let mut lines = BufReader::new(stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            // a trailing '?' asks for completions instead of running the line
            if let Some(partial) = input.strip_suffix('?') {
                let completions = control.complete_prefixed(partial);
                info!("Completions: {}", completions.join(" "));
                continue;
            }
            if !control.handle_message(input) {
                debug!("Ignored console line: {}", input);
            }
        }
        warn!("Console input closed");
    });

    tokio::signal::ctrl_c().await.context("Failed to listen for ctrl-c")?;
    info!("Shutting down");
    Ok(())
}

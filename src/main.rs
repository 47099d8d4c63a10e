//! Bamboo Breakout entry point
//!
//! Runs a replay script headlessly against a body registry and prints the
//! emitted events as JSON lines. A real front end plugs its engine in through
//! `PhysicsWorld` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use bamboo_breakout::replay::{Script, run_script};
    use bamboo_breakout::sim::{BodyRegistry, GameScene};
    use bamboo_breakout::Settings;

    env_logger::init();
    log::info!("Bamboo Breakout (headless) starting...");

    let settings = Settings::load();

    let script = match std::env::args().nth(1) {
        Some(path) => match Script::load(&path) {
            Ok(script) => {
                log::info!("Loaded {} steps from {}", script.steps.len(), path);
                script
            }
            Err(e) => {
                log::error!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No script given, running the demo");
            Script::demo()
        }
    };

    let mut game = GameScene::new(BodyRegistry::new(), settings);
    if let Err(e) = game.did_move() {
        log::error!("Scene setup failed: {}", e);
        return ExitCode::FAILURE;
    }

    let events = match run_script(&mut game, &script) {
        Ok(events) => events,
        Err(e) => {
            log::error!("Replay failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for event in &events {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => log::warn!("Cannot encode {:?}: {}", event, e),
        }
    }

    log::info!(
        "Replay finished: {} events, phase {:?}, {} blocks left",
        events.len(),
        game.phase(),
        game.blocks_remaining()
    );
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host engine
}

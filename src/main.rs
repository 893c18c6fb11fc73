//! Headless run of a level
//!
//! Usage: `cellblock [level.ron|level.json] [--ticks N]`

use cellblock::prelude::*;

struct Args {
    level: Option<String>,
    ticks: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        level: None,
        ticks: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a value")?;
                let ticks = value
                    .parse()
                    .map_err(|_| format!("invalid tick count {value:?}"))?;
                args.ticks = Some(ticks);
            }
            _ if args.level.is_none() => args.level = Some(arg),
            _ => return Err(format!("unexpected argument {arg:?}")),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = parse_args()?;
    let level = match &args.level {
        Some(path) => Level::load(path)?,
        None => {
            log::info!("no level given, using the built-in demo");
            Level::demo()
        }
    };

    let mut config = SimulationConfig::default().with_title(level.name.clone());
    if let Some(ticks) = args.ticks {
        config = config.with_max_ticks(ticks);
    }

    let mut sim = Simulation::new(config, vec![level]).with_flow(UiFlow::new());
    if !sim.start() {
        return Err("level failed to load".into());
    }

    let ticks = sim.run_with(|sim| {
        let elapsed = sim.time().elapsed_seconds();
        for event in sim.events_mut().drain() {
            log::info!("[{elapsed:>7.2}s] {event:?}");
        }
    });

    log::info!(
        "finished after {ticks} ticks ({:.1}s simulated): {}",
        sim.time().elapsed_seconds(),
        sim.stats().format_stats()
    );
    Ok(())
}

//! Headless Blockfall runner (default binary).
//!
//! `blockfall simulate [--seed N] [--difficulty D] [--pieces N] [--json]`
//! `blockfall run [--seed N] [--difficulty D] [--millis N] [--json]`
//!
//! Settings come from `BLOCKFALL_*` environment variables first; flags override them.

use anyhow::Result;
use tokio::runtime::Runtime;

use blockfall::cli::{parse_args, run_for, simulate, status_lines, Command};
use blockfall::engine::GameSettings;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args, GameSettings::from_env())? {
        Command::Simulate(config) => {
            println!(
                "[Session] simulate seed={} difficulty={} pieces={}",
                config.settings.seed,
                config.settings.difficulty.as_str(),
                config.pieces
            );

            let report = simulate(&config, |piece, event, state| {
                if event.lines_cleared > 0 {
                    println!(
                        "[Session] piece {}: cleared {} (+{}) score={} level={}",
                        piece,
                        event.lines_cleared,
                        event.score_delta,
                        state.score(),
                        state.level()
                    );
                }
                if event.game_over {
                    println!("[Session] piece {}: game over", piece);
                }
            });

            println!(
                "[Session] done: pieces={} score={} lines={} level={} game_over={}",
                report.pieces_locked, report.score, report.lines, report.level, report.game_over
            );
            if config.json {
                println!("{}", serde_json::to_string_pretty(&report.snapshot)?);
            }
        }
        Command::Run(config) => {
            println!(
                "[Session] run seed={} difficulty={} millis={}",
                config.settings.seed,
                config.settings.difficulty.as_str(),
                config.millis
            );

            let rt = Runtime::new()?;
            let report = rt.block_on(run_for(&config))?;

            println!("[Session] frames published: {}", report.frames);
            for line in status_lines(&report.last_frame) {
                println!("[Session] {}", line);
            }
            if config.json {
                println!("{}", serde_json::to_string_pretty(&report.last_frame.state.snapshot())?);
            }
        }
    }

    Ok(())
}

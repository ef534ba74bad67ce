#![warn(clippy::all, clippy::pedantic)]

use anyhow::Context;
use blockgrid::app::{App, AppResult};
use blockgrid::config::{self, Config};
use blockgrid::highscores::get_scores_file_path;
use blockgrid::timer::ThreadTimer;
use crossbeam_channel::{Receiver, select, unbounded};
use log::{error, info};
use std::io::{self, BufRead};
use std::thread;

fn main() -> AppResult<()> {
    // Keep log output out of the terminal, the board is drawn there
    let log_path = "blockgrid.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("failed to create {log_path}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting blockgrid");

    let config = match config::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    // Turn expiries and typed commands both land on this thread
    let (fired_sender, fired) = unbounded();
    let timer = ThreadTimer::spawn(fired_sender);
    let input = spawn_input_reader();

    let mut app = App::new(config, Box::new(timer), get_scores_file_path())?;
    app.start()?;
    print!("{}", app.render());

    while !app.should_quit {
        select! {
            recv(input) -> line => match line {
                Ok(line) => app.handle_line(&line)?,
                // stdin closed
                Err(_) => break,
            },
            recv(fired) -> expiry => {
                if let Ok(expiry) = expiry {
                    app.on_timer(expiry)?;
                }
            }
        }
        print!("{}", app.render());
    }

    app.shutdown();
    info!("Exiting with score {}", app.game.score());
    Ok(())
}

fn spawn_input_reader() -> Receiver<String> {
    let (sender, receiver) = unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

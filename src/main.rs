// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use taxon::build::run_index;
use taxon::config::MatcherConfig;
use taxon::index::{IndexStorage, PhraseIndex};
use taxon::logging::init_tracing;
use taxon::PhraseMatcher;

mod cli;
use cli::display;
use cli::{Cli, Commands, ReplInput};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref(), cli.name)?;

    match cli.command {
        Commands::Index { input, rebuild } => {
            let start = Instant::now();
            let report = run_index(&config, &input, rebuild)
                .with_context(|| format!("failed to index {}", input.display()))?;
            display::print_ingest_report(&report, start.elapsed());
        }
        Commands::Query { query, scores, json } => {
            let matcher = open_matcher(&config)?;
            let query = query.join(" ");
            let start = Instant::now();
            let results = matcher.run_query_scored(&query);
            let elapsed = start.elapsed();

            if json {
                println!("{}", serde_json::to_string_pretty(results.as_slice())?);
            } else {
                display::print_results(&query, &results, elapsed, scores);
            }
        }
        Commands::Repl { scores } => {
            let matcher = open_matcher(&config)?;
            run_repl(&matcher, scores)?;
        }
        Commands::Check { phrase } => {
            let matcher = open_matcher(&config)?;
            let phrase = phrase.join(" ");
            if matcher.contains_phrase(&phrase) {
                println!("{} {}", display::themed(display::GREEN, &[], "✓"), phrase);
            } else {
                println!("{} {}", display::themed(display::RED, &[], "✗"), phrase);
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn load_config(path: Option<&Path>, name: Option<String>) -> Result<MatcherConfig> {
    let mut config = match path {
        Some(path) => MatcherConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MatcherConfig::default(),
    };
    if let Some(name) = name {
        config.index.name = name;
    }
    config.validate()?;
    Ok(config)
}

fn open_matcher(config: &MatcherConfig) -> Result<PhraseMatcher> {
    let storage = IndexStorage::with_kind(config.index.kind, &config.index.dir)?;
    let index = storage
        .open(&config.index.name)
        .with_context(|| format!("failed to open index `{}`", config.index.name))?;
    tracing::debug!(phrases = index.len(), "index opened");
    Ok(PhraseMatcher::new(index, config)?)
}

fn run_repl(matcher: &PhraseMatcher, scores: bool) -> Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("{} ", display::themed(display::CYAN, &[display::BOLD], "taxon›"));
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match ReplInput::parse(&line) {
            ReplInput::Quit => break,
            ReplInput::Blank => {}
            ReplInput::ClearCaches => {
                matcher.clear_caches();
                if interactive {
                    println!("{}", display::themed(display::GRAY, &[display::DIM], "caches cleared"));
                }
            }
            ReplInput::Stats => display::print_stats(&matcher.stats()),
            ReplInput::Query(query) => {
                let start = Instant::now();
                let results = matcher.run_query_scored(query);
                display::print_results(query, &results, start.elapsed(), scores);
            }
        }
    }
    Ok(())
}

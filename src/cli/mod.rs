// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the taxon command-line interface.
//!
//! Four subcommands: `index` to ingest a vocabulary file, `query` to resolve
//! text once, `repl` to resolve lines from stdin interactively, and `check` to
//! test whether a phrase is stored.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "taxon",
    about = "Resolve free text against a vocabulary of canonical phrases",
    version
)]
pub struct Cli {
    /// JSON config file (defaults apply to anything it omits)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured index name
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Debug logging (TAXON_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a tab-separated vocabulary file into the index
    Index {
        /// Vocabulary file; column 1 holds `lang:word-word` entries
        input: PathBuf,

        /// Replace the existing index instead of appending to it
        #[arg(long)]
        rebuild: bool,
    },

    /// Resolve a query and print the matching phrases
    Query {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,

        /// Show scores, matched terms and timing
        #[arg(short, long)]
        scores: bool,

        /// Print results as JSON
        #[arg(long, conflicts_with = "scores")]
        json: bool,
    },

    /// Resolve queries read line by line from stdin
    ///
    /// `\q` quits, `\c` clears the caches, `\s` prints cache statistics.
    Repl {
        /// Show scores, matched terms and timing
        #[arg(short, long)]
        scores: bool,
    },

    /// Exit successfully if the phrase is stored (compared by stems)
    Check {
        #[arg(required = true)]
        phrase: Vec<String>,
    },
}

/// A REPL input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Quit,
    ClearCaches,
    Stats,
    Blank,
    Query(&'a str),
}

impl<'a> ReplInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            r"\q" => Self::Quit,
            r"\c" => Self::ClearCaches,
            r"\s" => Self::Stats,
            "" => Self::Blank,
            query => Self::Query(query),
        }
    }
}

//! Interactive Menu
//!
//! Default entry point when no subcommand is given. Loops until the user
//! exits; each option maps to one of the non-interactive commands.

use std::io::{self, Write};

use crate::cli::commands;
use crate::cli::ui::Output;
use crate::config::Config;
use crate::types::Result;

pub fn run(config: Config) -> Result<()> {
    let out = Output::new();
    out.header("WEBLOOM RESEARCH ASSISTANT");

    loop {
        out.section("MENU");
        println!("  1. New research run");
        println!("  2. Resummarize existing data");
        println!("  3. Connectivity check");
        println!("  4. Help");
        println!("  5. Exit");

        let choice = prompt("Choose an option: ")?;
        match choice.trim() {
            "1" => {
                let topic = prompt("Research topic: ")?;
                let topic = topic.trim();
                if topic.is_empty() {
                    out.warning("Empty topic, returning to menu");
                    continue;
                }
                if let Err(e) = commands::search::run(topic, config.clone()) {
                    out.error(&format!("Run failed: {e}"));
                }
            }
            "2" => {
                list_data_files(&config, &out);
                let topic = prompt("Topic of the existing data: ")?;
                let topic = topic.trim();
                if topic.is_empty() {
                    out.warning("Empty topic, returning to menu");
                    continue;
                }
                // Errors already reported by the command; the menu keeps running
                let _ = commands::resummarize::run(topic, config.clone());
            }
            "3" => {
                if let Err(e) = commands::check::run(config.clone()) {
                    out.error(&format!("Check failed: {e}"));
                }
            }
            "4" => print_help(&out),
            "5" | "q" | "quit" | "exit" => {
                out.info("Bye");
                return Ok(());
            }
            other => out.warning(&format!("Unknown option: {other}")),
        }
    }
}

/// Show the raw-data files already present in the output directory
fn list_data_files(config: &Config, out: &Output) {
    let Ok(entries) = std::fs::read_dir(&config.output.dir) else {
        return;
    };

    let mut found = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with("data_") && name.ends_with(".json") {
            found.push(name);
        }
    }
    found.sort();

    if found.is_empty() {
        out.info("No raw-data files found in the output directory.");
    } else {
        out.info("Available raw-data files:");
        for (i, name) in found.iter().enumerate() {
            out.item(i + 1, name);
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn print_help(out: &Output) {
    out.section("HELP");
    println!("A research run turns a topic into search terms, fetches curated");
    println!("pages for each term, and drives the text through a four-stage");
    println!("agent pipeline (summarize, analyze, organize, synthesize).");
    println!();
    println!("Artifacts per run, named after the normalized topic:");
    println!("  data_<topic>.json            raw collected pages");
    println!("  report_partial_<topic>.txt   per-term results, flushed as they finish");
    println!("  report_final_<topic>.txt     the synthesized report");
    println!();
    println!("The credential is read from COHERE_API_KEY or a .env file.");
}

use clap::{Parser, ValueEnum};
use karakuri::prelude::*;
use std::fs;
use std::io::{self, BufRead, Write};

/// Validate, run, or translate a flowchart exported by the canvas UI.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flowchart JSON file
    graph: String,

    /// What to do with the graph after validation
    #[arg(short, long, value_enum, default_value_t = Mode::Run)]
    mode: Mode,

    /// Consume animation delays instantly instead of sleeping them out
    #[arg(long)]
    unpaced: bool,

    /// Speed multiplier applied to all animation delays
    #[arg(long, default_value_t = 1.0)]
    speed: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Execute the flowchart
    Run,
    /// Print the generated program text
    Code,
}

/// Prints each console line as the run appends it.
struct ConsolePrinter {
    printed: usize,
}

impl RunObserver for ConsolePrinter {
    fn on_console(&mut self, text: &str) {
        let lines: Vec<&str> = text.lines().collect();
        for line in &lines[self.printed..] {
            println!("{line}");
        }
        self.printed = lines.len();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.graph)
        .map_err(|e| format!("failed to read graph file '{}': {}", cli.graph, e))?;
    let ui_graph: UiGraph = serde_json::from_str(&raw)?;
    let graph = ui_graph.into_graph()?;

    let report = validate_messages(&graph);
    if !report.is_empty() {
        eprintln!("The flowchart is not runnable:");
        for message in &report {
            eprintln!("  - {message}");
        }
        std::process::exit(1);
    }

    match cli.mode {
        Mode::Code => {
            print!("{}", generate(&graph));
        }
        Mode::Run => {
            let mut engine = Engine::builder(&graph)
                .observer(Box::new(ConsolePrinter { printed: 0 }))
                .build();
            engine.start()?;
            engine.set_speed(cli.speed);

            let prompt = |request: &InputRequest| {
                print!("input for '{}' ({}): ", request.variable, request.value_type);
                let _ = io::stdout().flush();
                let mut line = String::new();
                let _ = io::stdin().lock().read_line(&mut line);
                line.trim_end_matches(['\n', '\r']).to_string()
            };

            let outcome = if cli.unpaced {
                drive::run_unpaced(&mut engine, prompt)
            } else {
                drive::run_paced(&mut engine, prompt)
            };

            match outcome.status {
                RunStatus::Completed => println!("-> Run completed."),
                RunStatus::Aborted(error) => {
                    eprintln!("-> Run aborted: {error}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

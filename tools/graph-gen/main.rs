use clap::Parser;
use karakuri::prelude::*;
use rand::Rng;
use std::fs;

/// A CLI tool to generate sample flowchart files for the karakuri engine.
///
/// The generated program is always well-formed: a counting loop that prints
/// each value, followed by a random run of movement blocks.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flowchart.json")]
    output: String,

    /// The minimum number of movement blocks after the loop
    #[arg(long, default_value_t = 0)]
    min: usize,

    /// The maximum number of movement blocks after the loop
    #[arg(long, default_value_t = 6)]
    max: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    let iterations = rng.random_range(2..=5);
    let tail_blocks = rng.random_range(cli.min..=cli.max);
    println!(
        "Generating a counting loop of {} iterations with {} trailing movement blocks...",
        iterations, tail_blocks
    );

    let graph = generate_flowchart(&mut rng, iterations, tail_blocks);

    let json_output = serde_json::to_string_pretty(&graph)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved flowchart to '{}'",
        cli.output
    );

    Ok(())
}

fn generate_flowchart(rng: &mut impl Rng, iterations: u32, tail_blocks: usize) -> UiGraph {
    let mut blocks = vec![
        block("start", "start", &[]),
        block("init", "createVar", &[("varName", "i"), ("varValue", "0")]),
        block(
            "loop",
            "while",
            &[
                ("leftOperand", "i"),
                ("operator", "<"),
                ("rightOperand", &iterations.to_string()),
            ],
        ),
        block("print", "output", &[("text", "{i}")]),
        block(
            "step",
            "updateVar",
            &[("varName", "i"), ("varValue", "1"), ("operator", "+")],
        ),
        block("finish", "end", &[]),
    ];

    let mut edges = vec![
        edge("e-start", "start", "init", None),
        edge("e-init", "init", "loop", None),
        edge("e-body", "loop", "print", Some("body")),
        edge("e-print", "print", "step", None),
        edge("e-step", "step", "loop", None),
    ];

    // Random movement tail between the loop exit and the end block.
    let mut previous = "loop".to_string();
    let mut handle = Some("exit");
    for index in 0..tail_blocks {
        let id = format!("tail-{index}");
        blocks.push(random_movement_block(rng, &id));
        edges.push(edge(&format!("e-{id}"), &previous, &id, handle));
        previous = id;
        handle = None;
    }
    edges.push(edge("e-finish", &previous, "finish", handle));

    UiGraph { blocks, edges }
}

fn random_movement_block(rng: &mut impl Rng, id: &str) -> UiBlock {
    if rng.random_bool(0.5) {
        let direction = ["up", "down", "left", "right"][rng.random_range(0..4)];
        let distance = rng.random_range(5..=50).to_string();
        block(id, "move", &[("direction", direction), ("distance", &distance)])
    } else {
        let direction = ["left", "right"][rng.random_range(0..2)];
        let degrees = [45, 90, 180][rng.random_range(0..3)].to_string();
        block(id, "rotate", &[("direction", direction), ("degrees", &degrees)])
    }
}

fn block(id: &str, block_type: &str, fields: &[(&str, &str)]) -> UiBlock {
    let mut map = serde_json::Map::new();
    for (name, value) in fields {
        map.insert(
            name.to_string(),
            serde_json::Value::String(value.to_string()),
        );
    }
    UiBlock {
        id: id.to_string(),
        block_type: block_type.to_string(),
        fields: map,
    }
}

fn edge(id: &str, source: &str, target: &str, handle: Option<&str>) -> UiEdge {
    UiEdge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: handle.map(str::to_string),
    }
}

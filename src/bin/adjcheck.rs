//! CLI entry point for the `adjcheck` command-line tool.

use std::io::{self, Write};
use std::process;

use clap::{Parser, ValueEnum};
use log::info;

use adjcheck::io::{read_graph, write_coloring, write_matrix, Delimiter, Layout, LoadFromFile, ReadOptions};
use adjcheck::{Connectivity, ConnectivityCheck, GraphError, GraphResult, MatrixGraph, TwoColoring, Vertex, DEFAULT_BOUND, MAX_BOUND};

#[derive(Parser)]
#[command(
    name = "adjcheck",
    about = "Reads an undirected graph and reports whether it is connected and bipartite"
)]
struct Cli {
    /// Input file (`.gz` is decompressed). Reads standard input when omitted.
    file: Option<String>,

    /// Whether rows hold edges or adjacency matrix rows
    #[arg(long, value_enum, default_value_t = LayoutArg::Edges)]
    layout: LayoutArg,

    /// Field separator. Defaults to `;` for files and whitespace for standard input.
    #[arg(long)]
    delimiter: Option<char>,

    /// Whether the first line holds the number of rows. Defaults to false for files
    /// and true for standard input.
    #[arg(long)]
    counted: Option<bool>,

    /// Maximum number of vertices
    #[arg(long, default_value_t = DEFAULT_BOUND)]
    bound: usize,

    /// Vertex the two-colouring starts from
    #[arg(long, default_value = "0")]
    start: Vertex,

    /// Meaning of "fully connected": reachable or complete
    #[arg(long, default_value = "reachable")]
    connectivity: Connectivity,

    /// Print the colour assigned to every vertex
    #[arg(long)]
    colors: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Edges,
    Matrix,
}

impl Cli {
    fn read_options(&self) -> GraphResult<ReadOptions> {
        if self.bound > MAX_BOUND {
            return Err(GraphError::CapacityTooLarge { bound: self.bound, max: MAX_BOUND })
        }

        let from_stdin = self.file.is_none();
        let layout = match self.layout {
            LayoutArg::Edges => Layout::Edges,
            LayoutArg::Matrix => Layout::Matrix,
        };
        let delimiter = match self.delimiter {
            Some(c) if !c.is_whitespace() => Delimiter::Char(c),
            Some(_) => Delimiter::Whitespace,
            None if from_stdin => Delimiter::Whitespace,
            None => Delimiter::Char(adjcheck::io::CSV_SEPARATOR),
        };

        Ok(ReadOptions {
            layout,
            delimiter,
            counted: self.counted.unwrap_or(from_stdin),
            bound: self.bound,
        })
    }
}

fn run(cli: &Cli) -> GraphResult<()> {
    let opts = cli.read_options()?;
    let graph = match &cli.file {
        Some(file) => MatrixGraph::from_file(file, &opts)?,
        None => read_graph(io::stdin().lock(), &opts)?,
    };
    info!("Read {} vertices and {} edges", graph.num_vertices(), graph.num_edges());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_matrix(&graph, &mut out)?;
    writeln!(out, "Is fully connected?: {}", graph.is_connected_as(cli.connectivity))?;

    let coloring = graph.two_coloring(cli.start);
    writeln!(out, "Is bipartite?: {}", coloring.is_bipartite())?;
    if cli.colors {
        write_coloring(&coloring, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(exit_code(&e));
    }
}

fn exit_code(e: &GraphError) -> i32 {
    match e {
        GraphError::Io(_) => 1,
        GraphError::MalformedInput { .. }
        | GraphError::InconsistentMatrix(_) => 2,
        GraphError::OutOfRange { .. }
        | GraphError::CapacityTooLarge { .. } => 3,
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####

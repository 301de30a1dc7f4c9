use anyhow::Context;
use clap::{Parser, Subcommand};
use host::{
    generate_maze, load_json, random_seed, save_json, solve_maze, solved_maze, MazeSnapshot, SearchMode,
    SolveReport,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "maze", version, about = "Perfect maze generator and solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and save its snapshot as JSON
    Generate {
        /// Rooms per row
        #[arg(long, default_value_t = 10)]
        width: usize,
        /// Rooms per column
        #[arg(long, default_value_t = 10)]
        height: usize,
        /// Seed for deterministic generation (random if omitted)
        #[arg(long)]
        seed: Option<u32>,
        /// Output file (defaults to <seed>_maze.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Regenerate a maze from its seed and solve it
    Solve {
        #[arg(long, default_value_t = 10)]
        width: usize,
        #[arg(long, default_value_t = 10)]
        height: usize,
        #[arg(long)]
        seed: u32,
        /// first-match or exhaustive
        #[arg(long, default_value_t = SearchMode::FirstMatch)]
        mode: SearchMode,
        /// Output file (defaults to <seed>_solution.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print a maze and its solution as text
    Show {
        #[arg(long, default_value_t = 10)]
        width: usize,
        #[arg(long, default_value_t = 10)]
        height: usize,
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Summarize a snapshot or solution file written by another command
    Inspect {
        file: PathBuf,
    },
}

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    println!("🧭 Maze Builder");
    println!("{}", "=".repeat(70));
    println!();

    let result = match cli.command {
        Command::Generate { width, height, seed, output } => generate_command(width, height, seed, output),
        Command::Solve { width, height, seed, mode, output } => solve_command(width, height, seed, mode, output),
        Command::Show { width, height, seed } => show_command(width, height, seed),
        Command::Inspect { file } => inspect_command(file),
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("❌ Error: {:#}", e);
        eprintln!("{}", "=".repeat(70));
        std::process::exit(1);
    }
}

fn generate_command(width: usize, height: usize, seed: Option<u32>, output: Option<PathBuf>) -> anyhow::Result<()> {
    println!("📋 Generating maze");
    println!("  Size: {}x{} rooms", width, height);
    match seed {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: random"),
    }
    println!();

    let start = Instant::now();
    let snapshot = generate_maze(width, height, seed)?;
    println!("  Generation time: {:.3}s", start.elapsed().as_secs_f64());
    println!();

    println!("✅ Maze generated successfully!");
    print_snapshot(&snapshot);
    println!();

    let file_to_save = output.unwrap_or_else(|| PathBuf::from(format!("{}_maze.json", snapshot.seed)));
    save_json(&snapshot, &file_to_save).context("saving maze snapshot")?;
    println!("💾 Maze saved to: {}", file_to_save.display());
    println!(
        "   Use 'solve --width {} --height {} --seed {}' to solve it",
        snapshot.width, snapshot.height, snapshot.seed
    );

    println!("{}", "=".repeat(70));
    Ok(())
}

fn solve_command(
    width: usize,
    height: usize,
    seed: u32,
    mode: SearchMode,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("📋 Solving maze");
    println!("  Size: {}x{} rooms", width, height);
    println!("  Seed: {}", seed);
    println!("  Search mode: {}", mode);
    println!();

    let start = Instant::now();
    let report = solve_maze(width, height, seed, mode)?;
    println!("  Search time: {:.3}s", start.elapsed().as_secs_f64());
    println!();

    println!("✅ Maze solved!");
    print_report(&report);
    println!();

    let file_to_save = output.unwrap_or_else(|| PathBuf::from(format!("{}_solution.json", seed)));
    save_json(&report, &file_to_save).context("saving solution")?;
    println!("💾 Solution saved to: {}", file_to_save.display());

    println!("{}", "=".repeat(70));
    Ok(())
}

fn show_command(width: usize, height: usize, seed: Option<u32>) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(random_seed);
    let (maze, parts) = solved_maze(width, height, seed, SearchMode::FirstMatch)?;

    println!("  Seed: {}  Entry: {}  Exit: {}", seed, maze.entry_position(), maze.exit_position());
    println!("  Path length: {} cells", parts.path.len());
    println!();
    print!("{}", maze);
    println!("{}", "=".repeat(70));
    Ok(())
}

fn inspect_command(file: PathBuf) -> anyhow::Result<()> {
    println!("📦 Loading {}", file.display());
    println!();

    // A solution carries a snapshot; try the larger shape first
    if let Ok(report) = load_json::<SolveReport>(&file) {
        print_report(&report);
    } else {
        let snapshot: MazeSnapshot = load_json(&file)?;
        print_snapshot(&snapshot);
    }

    println!("{}", "=".repeat(70));
    Ok(())
}

fn print_snapshot(snapshot: &MazeSnapshot) {
    println!("  Seed: {}", snapshot.seed);
    println!("  Grid size: {}x{} cells", snapshot.rows, snapshot.cols);
    println!("  Entry: {}", snapshot.entry);
    println!("  Exit: {}", snapshot.exit);
}

fn print_report(report: &SolveReport) {
    print_snapshot(&report.snapshot);
    println!("  Search mode: {}", report.mode);
    println!("  Path length: {} cells", report.path.len());
    println!("  Paths found: {}", report.paths_found);
    println!("  Trace events: {}", report.trace.len());
    let preview: Vec<String> = report.path.iter().take(10).map(|p| p.to_string()).collect();
    println!("  First steps: {}", preview.join(" -> "));
}

use escape_maze::{generate, GridPosition, MazeData, Tile};
use std::env;
use std::fs;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("🧩 Escape Maze Generator");
    println!("{}", "=".repeat(70));
    println!();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let width: usize = args[1].parse().unwrap_or_else(|_| {
        eprintln!("❌ Error: Invalid width '{}'. Must be a positive integer.", args[1]);
        std::process::exit(1);
    });

    let height: usize = args[2].parse().unwrap_or_else(|_| {
        eprintln!("❌ Error: Invalid height '{}'. Must be a positive integer.", args[2]);
        std::process::exit(1);
    });

    let seed: u32 = match args.get(3) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("❌ Error: Invalid seed '{}'. Must be a positive integer.", raw);
            std::process::exit(1);
        }),
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(1),
    };

    let output_file = args.get(4).map(|s| s.as_str());

    println!("📋 Generating maze");
    println!("  Requested size: {}x{}", width, height);
    println!("  Seed: {}", seed);
    println!();

    let start = Instant::now();
    let maze = generate(width, height, seed);
    let duration = start.elapsed();

    println!("✅ Maze generated in {:.2}ms", duration.as_secs_f64() * 1000.0);
    println!("  Grid: {}x{}", maze.width, maze.height);
    println!("  Spawn: ({}, {})", maze.spawn.x, maze.spawn.y);
    println!("  Exit: ({}, {})", maze.exit.x, maze.exit.y);
    println!("  Doors: {}", maze.doors.len());
    println!("  Levers: {}", maze.levers.len());
    if maze.doors.is_empty() {
        println!("  ⚠️  No mechanisms placed - fallback maze");
    }
    println!();
    println!("{}", render_ascii(&maze));

    if let Some(path) = output_file {
        match save_maze(&maze, path) {
            Ok(_) => {
                println!("💾 Maze saved to: {}", path);
                println!("   Load this file in the game client to play it!");
            }
            Err(e) => {
                eprintln!("❌ Error saving maze: {}", e);
                std::process::exit(1);
            }
        }
    }

    println!("{}", "=".repeat(70));
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <width> <height> [seed] [output_file]", program);
    eprintln!();
    eprintln!("  width, height: Requested grid size (normalized to odd values)");
    eprintln!("  seed:          Optional RNG seed for a reproducible maze");
    eprintln!("                 Defaults to the current unix time");
    eprintln!("  output_file:   Optional file to save the maze as JSON");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  {} 21 21 2918957128 maze.json", program);
}

/// Render the maze as one character per tile: '#' wall, '.' floor,
/// 'D' door, 'L' lever, 'E' exit, 'S' spawn.
fn render_ascii(maze: &MazeData) -> String {
    let mut out = String::new();
    for y in 0..maze.height {
        for x in 0..maze.width {
            let pos = GridPosition::new(x, y);
            let c = if pos == maze.spawn && pos != maze.exit {
                'S'
            } else {
                match maze.grid.tile(pos) {
                    Tile::Wall => '#',
                    Tile::Floor => '.',
                    Tile::Door => 'D',
                    Tile::Lever => 'L',
                    Tile::Exit => 'E',
                }
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

fn save_maze(maze: &MazeData, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(maze)?;
    fs::write(path, json)?;
    Ok(())
}

use clap::Parser;
use color_eyre::eyre::eyre;
use cube_core::Cube;
use itertools::Itertools;
use log::info;

mod display;
mod scramble;

/// Model, scramble and inspect a 3x3x3 twisty puzzle
#[derive(Parser)]
#[command(version, about)]
enum Commands {
    /// Print a solved cube
    Solved {
        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },
    /// Apply movement tokens to a solved cube and print the result
    Apply {
        /// Movement tokens, either one per argument or quoted: R U R' U'
        movements: Vec<String>,
        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },
    /// Scramble a solved cube with random movements and print both
    Scramble {
        /// Fewest movements to apply
        #[arg(long, default_value_t = scramble::DEFAULT_MIN)]
        min: usize,
        /// Most movements to apply
        #[arg(long, default_value_t = scramble::DEFAULT_MAX)]
        max: usize,
        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    match Commands::parse() {
        Commands::Solved { plain } => {
            print!("{}", display::render(&Cube::new(), !plain));
        }
        Commands::Apply { movements, plain } => {
            let mut cube = Cube::new();
            for argument in &movements {
                cube.apply_scramble(argument.split_whitespace())?;
            }
            print!("{}", display::render(&cube, !plain));
        }
        Commands::Scramble { min, max, plain } => {
            if min > max {
                return Err(eyre!("--min {min} must not exceed --max {max}"));
            }
            let movements = scramble::scramble(min, max);
            info!("applying {} random movements", movements.len());

            let mut cube = Cube::new();
            for &movement in &movements {
                cube.apply(movement)?;
            }
            println!("{}", movements.iter().join(" "));
            print!("{}", display::render(&cube, !plain));
        }
    }

    Ok(())
}

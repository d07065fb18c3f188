//! Play command - a human against an automated strategy in the terminal

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};

use backrace_core::{Board, Colour, DiceRoll, Game, GameConfig, Strategy};

use crate::experiment::StrategyChoice;
use crate::human::HumanStrategy;
use crate::render::render_board;

/// Colour choice for the human player
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColourChoice {
    White,
    Black,
}

impl From<ColourChoice> for Colour {
    fn from(choice: ColourChoice) -> Self {
        match choice {
            ColourChoice::White => Colour::White,
            ColourChoice::Black => Colour::Black,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Computer opponent
    #[arg(long, value_enum, default_value = "look-ahead")]
    pub opponent: StrategyChoice,

    /// Colour the human plays
    #[arg(long, value_enum, default_value = "white")]
    pub colour: ColourChoice,

    /// Your name as shown in prompts
    #[arg(long, default_value = "Player")]
    pub name: String,

    /// Seed for the dice and the opponent
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let human_colour: Colour = args.colour.into();
    let mut computer = args.opponent.build(seed);
    let stdin = io::stdin();
    let mut human = HumanStrategy::new(args.name, stdin.lock(), io::stdout());

    println!(
        "You are {} against {} ({})",
        human_colour,
        computer.name(),
        computer.difficulty()
    );

    // First player alternates with the seed, as in an experiment
    let first_player = if seed % 2 == 0 { Colour::White } else { Colour::Black };
    let mut game = Game::new(first_player, GameConfig::default().with_seed(seed));
    println!("{} moves first", game.first_player());

    let on_turn = |colour: Colour, dice: &DiceRoll, board: &Board| {
        if colour != human_colour {
            println!("{} rolled {}", colour, dice);
            println!("{}", render_board(&board.snapshot()));
        }
        let _ = io::stdout().flush();
    };
    let outcome = match human_colour {
        Colour::White => game.run_with(&mut human, &mut computer, on_turn),
        Colour::Black => game.run_with(&mut computer, &mut human, on_turn),
    };

    println!("{}", render_board(&game.board().snapshot()));
    match outcome.winner() {
        None => println!("No winner after {} turns", outcome.turns),
        Some(winner) if winner == human_colour => {
            println!("{} wins after {} turns. Well played!", winner, outcome.turns)
        }
        Some(winner) => println!("{} wins after {} turns.", winner, outcome.turns),
    }
    Ok(())
}

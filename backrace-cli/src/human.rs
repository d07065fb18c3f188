//! Interactive player reading moves from a terminal

use std::io::{BufRead, Write};

use backrace_core::{Colour, GameError, Location, OpponentActivity, Strategy, Turn};

use crate::render::render_board;

/// A human player answering prompts on `input`, with output to `output`
pub struct HumanStrategy<R, W> {
    name: String,
    input: R,
    output: W,
}

/// What a prompt produced
enum Answer {
    Number(i64),
    NotANumber,
    Closed,
}

impl<R: BufRead, W: Write> HumanStrategy<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        // A closed terminal leaves nothing to report to
        let _ = writeln!(self.output, "{}", text);
    }

    fn ask(&mut self, prompt: &str) -> Answer {
        self.say(prompt);
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Answer::Closed,
            Ok(_) => match line.trim().parse() {
                Ok(n) => Answer::Number(n),
                Err(_) => Answer::NotANumber,
            },
        }
    }

    /// Ask until the player names a location holding one of their pieces
    fn ask_location(&mut self, turn: &Turn<'_>, colour: Colour) -> Option<Location> {
        loop {
            match self.ask("Enter the location of the piece you want to move?") {
                Answer::Closed => return None,
                Answer::NotANumber => self.say("That's not a number! Try again"),
                Answer::Number(n) => {
                    let location = Location::try_from(n).ok();
                    match location {
                        Some(loc) if turn.view().owner_at(loc) == Some(colour) => return Some(loc),
                        _ => self.say(&format!("You don't have a piece at location {}", n)),
                    }
                }
            }
        }
    }

    /// Ask for a distance and play it; false once input is exhausted
    fn ask_distance(&mut self, turn: &mut Turn<'_>, location: Location) -> Result<bool, GameError> {
        loop {
            match self.ask("How far (or 0 to move another piece)?") {
                Answer::Closed => return Ok(false),
                Answer::NotANumber => self.say("That's not a number! Try again"),
                Answer::Number(0) => return Ok(true),
                Answer::Number(n) => {
                    let Ok(distance) = u8::try_from(n) else {
                        self.say(&format!("you cannot move the piece at {} by {}", location, n));
                        continue;
                    };
                    match turn.apply(location, distance) {
                        Ok(_) => {
                            self.say("");
                            self.say("");
                            return Ok(true);
                        }
                        Err(e) if e.is_recoverable() => self.say(&e.to_string()),
                        Err(e) => return Err(e),
                    }
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> Strategy for HumanStrategy<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn difficulty(&self) -> &'static str {
        "N/A"
    }

    fn play_turn(&mut self, turn: &mut Turn<'_>, _activity: &OpponentActivity) -> Result<(), GameError> {
        let colour = turn.colour();
        let intro = format!(
            "It is {}'s turn, you are {}, your roll is {:?}",
            self.name,
            colour,
            turn.remaining_dice()
        );
        self.say(&intro);

        while !turn.is_finished() {
            let board = render_board(&turn.view().snapshot());
            self.say(&board);
            if turn.view().no_moves_possible(colour, turn.remaining_dice()) {
                self.say("There are no valid moves. Your turn has ended.");
                break;
            }
            let left = format!("You have {:?} left", turn.remaining_dice());
            self.say(&left);

            let Some(location) = self.ask_location(turn, colour) else {
                break;
            };
            if !self.ask_distance(turn, location)? {
                break;
            }
        }

        self.say("Done!");
        Ok(())
    }
}

mod fruit;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use std::process::exit;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

fn main() {
    let mut game = game::SnakeGame::new();

    if let Err(err) = game.run() {
        // Never leave the terminal in raw mode underneath an error message.
        game.teardown();
        eprintln!("snake: terminal error: {}", err);
        exit(1);
    }
}

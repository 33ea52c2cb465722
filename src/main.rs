use minesweeper_ai::{AiPlayer, Cell, Game, GameError, GameState, Position};
use std::time::Duration;
use std::{env, thread};

const TURN_DELAY: Duration = Duration::from_millis(150);

fn main() {
    env_logger::init();

    let (width, height, mines) = parse_args().unwrap_or((9, 9, 10));
    match run_game(width, height, mines) {
        Ok(state) => match state {
            GameState::Won => println!("Board cleared!"),
            GameState::Lost => println!("Hit a mine. Game over."),
            GameState::Playing => println!("No provable moves left; stopping."),
        },
        Err(e) => eprintln!("Game error: {e}"),
    }
}

fn parse_args() -> Option<(u32, u32, u32)> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [w, h, m] => Some((w.parse().ok()?, h.parse().ok()?, m.parse().ok()?)),
        _ => None,
    }
}

fn run_game(width: u32, height: u32, mines: u32) -> Result<GameState, GameError> {
    let mut game = Game::new(width, height, mines)?;
    let mut player = AiPlayer::new();
    let mut turn = 0;

    while game.state() == GameState::Playing {
        if !player.take_turn(&mut game)? {
            break;
        }
        turn += 1;
        println!(
            "\nTurn {turn} ({} of {} mines identified):",
            player.known_mines().len(),
            game.mines_count()
        );
        print_board(&game);
        thread::sleep(TURN_DELAY);
    }

    Ok(game.state())
}

fn print_board(game: &Game) {
    let (width, height) = game.dimensions();

    print!("  ");
    for x in 0..width {
        print!("{} ", x % 10);
    }
    println!();

    for y in 0..height {
        print!("{} ", y % 10);
        for x in 0..width {
            let pos = Position::new(x as i32, y as i32);
            match game.get_cell(pos) {
                Ok(Cell::Hidden(_)) => print!("□ "),
                Ok(Cell::Revealed(0)) => print!("  "),
                Ok(Cell::Revealed(n)) => print!("{n} "),
                Ok(Cell::Flagged(_)) => print!("⚑ "),
                Ok(Cell::Questioned(_)) => print!("? "),
                Err(_) => unreachable!("printing within board bounds"),
            }
        }
        println!();
    }
}

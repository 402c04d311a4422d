use clap::Parser;
use log::LevelFilter;

use crate::error::{Error, Result};
use crate::game::{DEFAULT_POTION_COUNT, PotionsGame};
use crate::generator::{ContentsGenerator, DEFAULT_EMPTY_CHANCE, DEFAULT_PALETTE_SIZE};

pub const DEFAULT_COLUMNS: usize = 6;

#[derive(Parser, Debug, Clone)]
#[command(name = "potions")]
#[command(about = "Merge matching liquids until every potion is closed", long_about = None)]
pub struct Args {
    /// number of potions on the board
    #[arg(long, default_value_t = DEFAULT_POTION_COUNT)]
    pub potions: usize,

    /// potions per row
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// seed for the starting board (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// starting board, one potion per word bottom to top, e.g. "11 . 2213"
    #[arg(long)]
    pub board: Option<String>,

    /// chance that a slot ends a potion's starting stack
    #[arg(long, default_value_t = DEFAULT_EMPTY_CHANCE)]
    pub empty_chance: f64,

    /// number of liquid colors (1-9)
    #[arg(long, default_value_t = DEFAULT_PALETTE_SIZE)]
    pub palette: u8,

    /// disable undo and redo
    #[arg(long, default_value_t = false)]
    pub no_undo: bool,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub potion_count: usize,
    pub columns: usize,
    pub seed: u64,
    pub board: Option<PotionsGame>,
    pub generator: ContentsGenerator,
    pub undo_enable: bool,
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.potions == 0 {
            return Err(Error::NoPotions);
        }
        if args.columns == 0 {
            return Err(Error::NoColumns);
        }
        let generator = ContentsGenerator::new(args.empty_chance, args.palette)?;
        let board = args
            .board
            .as_deref()
            .map(PotionsGame::new_from_repr)
            .transpose()?;
        Ok(Self {
            potion_count: args.potions,
            columns: args.columns,
            seed: args.seed.unwrap_or_else(rand::random),
            board,
            generator,
            undo_enable: !args.no_undo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("potions").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_classic_board() {
        let args = parse(&[]);
        assert_eq!(args.potions, 18);
        assert_eq!(args.columns, 6);
        assert_eq!(args.seed, None);
        assert_eq!(args.empty_chance, 0.25);
        assert_eq!(args.palette, 4);
        assert_eq!(args.log_level, LevelFilter::Info);

        let settings = Settings::from_args(&args).unwrap();
        assert_eq!(settings.potion_count, 18);
        assert!(settings.undo_enable);
        assert!(settings.board.is_none());
    }

    #[test]
    fn board_is_parsed_up_front() {
        let settings = Settings::from_args(&parse(&["--board", "11 . 4321"])).unwrap();
        let board = settings.board.unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.get_text_representation(), "11 . 4321");

        assert_eq!(
            Settings::from_args(&parse(&["--board", "11 x"])).unwrap_err(),
            Error::InvalidRepr("x".to_string())
        );
    }

    #[test]
    fn explicit_values_are_kept() {
        let args = parse(&[
            "--potions", "8", "--columns", "4", "--seed", "11", "--palette", "3", "--no-undo",
            "--log-level", "debug",
        ]);
        let settings = Settings::from_args(&args).unwrap();
        assert_eq!(settings.potion_count, 8);
        assert_eq!(settings.columns, 4);
        assert_eq!(settings.seed, 11);
        assert!(!settings.undo_enable);
        assert_eq!(args.log_level, LevelFilter::Debug);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert_eq!(
            Settings::from_args(&parse(&["--potions", "0"])).unwrap_err(),
            Error::NoPotions
        );
        assert_eq!(
            Settings::from_args(&parse(&["--columns", "0"])).unwrap_err(),
            Error::NoColumns
        );
        assert_eq!(
            Settings::from_args(&parse(&["--empty-chance", "2"])).unwrap_err(),
            Error::InvalidEmptyChance(2.0)
        );
        assert_eq!(
            Settings::from_args(&parse(&["--palette", "12"])).unwrap_err(),
            Error::InvalidPalette(12)
        );
    }

    #[test]
    fn unknown_log_level_fails_to_parse() {
        assert!(Args::try_parse_from(["potions", "--log-level", "loud"]).is_err());
    }
}

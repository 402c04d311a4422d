use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("potion would hold {len} units, capacity is {capacity}")]
    Overfilled { len: usize, capacity: usize },
    #[error("color id {0} cannot be stored in a potion")]
    InvalidColor(u8),
    #[error("invalid potion representation {0:?}")]
    InvalidRepr(String),
    #[error("empty chance must lie in [0, 1], got {0}")]
    InvalidEmptyChance(f64),
    #[error("palette must contain between 1 and 9 colors, got {0}")]
    InvalidPalette(u8),
    #[error("a game needs at least one potion")]
    NoPotions,
    #[error("the potion grid needs at least one column")]
    NoColumns,
}

pub type Result<T> = std::result::Result<T, Error>;

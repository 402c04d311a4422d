use crate::error::{Error, Result};

pub const POTION_CAPACITY: usize = 4;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
pub enum Liquid {
    #[default]
    Empty,
    Color { id: u8 },
}
impl Liquid {
    /// Id 0 is the empty liquid, every other id a color.
    pub fn new(id: u8) -> Self {
        if id == 0 {
            Liquid::Empty
        } else {
            Liquid::Color { id }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Liquid::Empty)
    }

    #[allow(dead_code)]
    pub fn get_id(&self) -> u8 {
        match self {
            Liquid::Empty => 0,
            Liquid::Color { id } => *id,
        }
    }

    pub fn get_digit_representation(&self) -> char {
        match self {
            Liquid::Empty => '.',
            Liquid::Color { id } => char::from_digit(u32::from(*id), 10).unwrap_or('?'),
        }
    }
}

/// A stack of liquid units, bottom first. Never holds more than
/// [`POTION_CAPACITY`] units and never stores [`Liquid::Empty`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Potion {
    contents: Vec<Liquid>,
    is_selected: bool,
}
impl Potion {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_contents(ids: &[u8]) -> Result<Self> {
        if ids.len() > POTION_CAPACITY {
            return Err(Error::Overfilled {
                len: ids.len(),
                capacity: POTION_CAPACITY,
            });
        }
        let contents: Vec<Liquid> = ids.iter().map(|&id| Liquid::new(id)).collect();
        if contents.iter().any(Liquid::is_empty) {
            return Err(Error::InvalidColor(0));
        }
        Ok(Self {
            contents,
            is_selected: false,
        })
    }

    /// Parses one digit per unit, bottom to top. `.` (or nothing) is an empty potion.
    pub fn new_from_repr(repr: &str) -> Result<Self> {
        let s = repr.trim();
        if s.is_empty() || s == "." {
            return Ok(Self::empty());
        }
        let mut ids = Vec::with_capacity(s.len());
        for ch in s.chars() {
            let digit = ch
                .to_digit(10)
                .ok_or_else(|| Error::InvalidRepr(repr.to_string()))?;
            ids.push(digit as u8);
        }
        Self::with_contents(&ids)
    }

    #[allow(dead_code)]
    pub fn contents(&self) -> &[Liquid] {
        &self.contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.contents.len() == POTION_CAPACITY
    }

    pub fn get_empty_space(&self) -> usize {
        POTION_CAPACITY - self.contents.len()
    }

    /// Full and a single color throughout.
    pub fn is_closed(&self) -> bool {
        self.is_full() && self.contents.windows(2).all(|pair| pair[0] == pair[1])
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    /// Slot `index` counted from the bottom; [`Liquid::Empty`] above the top.
    pub fn slot(&self, index: usize) -> Liquid {
        self.contents.get(index).copied().unwrap_or_default()
    }

    pub fn get_top_liquid(&self) -> Option<Liquid> {
        self.contents.last().copied()
    }

    /// Length of the same-colored run at the top of the stack.
    pub fn get_top_run(&self) -> usize {
        let Some(top) = self.get_top_liquid() else {
            return 0;
        };
        self.contents
            .iter()
            .rev()
            .take_while(|&&liquid| liquid == top)
            .count()
    }

    /// Units a move from `self` into `other` would carry, 0 when the move is invalid.
    pub fn get_pourable_amount(&self, other: &Potion) -> usize {
        let Some(top) = self.get_top_liquid() else {
            return 0;
        };
        if self.is_closed() || other.is_closed() {
            return 0;
        }
        if other.get_top_liquid().is_some_and(|other_top| other_top != top) {
            return 0;
        }
        self.get_top_run().min(other.get_empty_space())
    }

    pub fn could_pour_into(&self, other: &Potion) -> bool {
        self.get_pourable_amount(other) > 0
    }

    /// Moves the top run into `other` as far as it fits. Returns the units moved.
    pub fn pour_into(&mut self, other: &mut Potion) -> usize {
        let transfer_amount = self.get_pourable_amount(other);
        for _ in 0..transfer_amount {
            if let Some(liquid) = self.contents.pop() {
                other.contents.push(liquid);
            }
        }
        transfer_amount
    }

    pub fn get_text_representation(&self) -> String {
        if self.contents.is_empty() {
            return ".".to_string();
        }
        self.contents
            .iter()
            .map(Liquid::get_digit_representation)
            .collect()
    }
}

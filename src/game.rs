use log::{debug, warn};
use rand::Rng;

use crate::error::{Error, Result};
use crate::generator::ContentsGenerator;
use crate::model::Potion;

pub const DEFAULT_POTION_COUNT: usize = 18;

/// The puzzle state: a fixed arena of potions addressed by index, plus at
/// most one selected potion. Only [`PotionsGame::move_contents`] changes
/// potion contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PotionsGame {
    potions: Vec<Potion>,
    selected: Option<usize>,
}

impl PotionsGame {
    pub fn new<R: Rng + ?Sized>(
        potion_count: usize,
        generator: &ContentsGenerator,
        rng: &mut R,
    ) -> Result<Self> {
        if potion_count == 0 {
            return Err(Error::NoPotions);
        }
        let potions = (0..potion_count).map(|_| generator.generate(rng)).collect();
        Self::from_potions(potions)
    }

    /// Builds a game from existing potions; selection flags are cleared.
    pub fn from_potions(mut potions: Vec<Potion>) -> Result<Self> {
        if potions.is_empty() {
            return Err(Error::NoPotions);
        }
        for potion in &mut potions {
            potion.set_selected(false);
        }
        Ok(Self {
            potions,
            selected: None,
        })
    }

    /// One potion representation per whitespace-separated token, e.g. `"11 . 2213"`.
    pub fn new_from_repr(repr: &str) -> Result<Self> {
        let potions = repr
            .split_whitespace()
            .map(Potion::new_from_repr)
            .collect::<Result<Vec<_>>>()?;
        Self::from_potions(potions)
    }

    pub fn potions(&self) -> &[Potion] {
        &self.potions
    }

    pub fn potion(&self, index: usize) -> Option<&Potion> {
        self.potions.get(index)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.potions.len()
    }

    pub fn get_selected(&self) -> Option<usize> {
        self.selected
    }

    /// Toggles the selection: selecting the selected potion again clears it,
    /// anything else replaces it. An unknown index is ignored.
    pub fn set_selected(&mut self, potion: Option<usize>) {
        if let Some(index) = potion
            && index >= self.potions.len()
        {
            warn!("Ignoring selection of unknown potion {index}");
            return;
        }
        if let Some(previous) = self.selected {
            self.potions[previous].set_selected(false);
        }
        if self.selected == potion {
            self.selected = None;
        } else {
            self.selected = potion;
            if let Some(index) = potion {
                self.potions[index].set_selected(true);
            }
        }
        debug!("Selection is now {:?}", self.selected);
    }

    /// Moves the top run of `from` onto `to` as far as it fits.
    ///
    /// An invalid move changes nothing. The returned flag tells whether any
    /// liquid moved; callers that want the silent behaviour can ignore it.
    pub fn move_contents(&mut self, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        let Ok([source, target]) = self.potions.get_disjoint_mut([from, to]) else {
            warn!("Ignoring move between unknown potions {from} -> {to}");
            return false;
        };
        let moved = source.pour_into(target);
        if moved > 0 {
            debug!(
                "Moved {moved} units {from} -> {to}: {} / {}",
                source.get_text_representation(),
                target.get_text_representation()
            );
        }
        moved > 0
    }

    pub fn could_move(&self, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        match (self.potions.get(from), self.potions.get(to)) {
            (Some(source), Some(target)) => source.could_pour_into(target),
            _ => false,
        }
    }

    /// Every potion is either empty or closed.
    pub fn is_solved(&self) -> bool {
        self.potions.iter().all(|p| p.is_empty() || p.is_closed())
    }

    pub fn total_units(&self) -> usize {
        self.potions.iter().map(Potion::len).sum()
    }

    pub fn get_text_representation(&self) -> String {
        self.potions
            .iter()
            .map(Potion::get_text_representation)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

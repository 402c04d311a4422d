use log::{debug, error, info};
use macroquad::color::Color;
use rand::Rng;

use crate::config::Settings;
use crate::error::Result;
use crate::game::PotionsGame;
use crate::generator::ContentsGenerator;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    SelectPotion(usize),
    Deselect,
    PourInto(usize, usize),
    Undo,
    Redo,
    Restart,
    NewGame,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    label: String,
    action: ControlAction,
    color: Color,
}
impl Button {
    pub fn new(label: &str, action: ControlAction, color: Color) -> Self {
        Self {
            label: label.to_string(),
            action,
            color,
        }
    }
    pub fn get_action(&self) -> ControlAction {
        self.action
    }
    pub fn get_label(&self) -> &str {
        &self.label
    }
    pub fn get_color(&self) -> Color {
        self.color
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitItem {
    Button { index: usize },
    Potion { index: usize },
}

/// Turns clicks into calls on the puzzle model and keeps the session history.
pub struct GameEngine<R: Rng> {
    game: PotionsGame,
    starting_game: PotionsGame,
    generator: ContentsGenerator,
    potion_count: usize,
    rng: R,
    buttons: Vec<Button>,
    undo_enable: bool,
    undo_stack: Vec<PotionsGame>,
    redo_stack: Vec<PotionsGame>,
}

impl<R: Rng> GameEngine<R> {
    pub fn new(settings: &Settings, mut rng: R) -> Result<Self> {
        let game = match &settings.board {
            Some(board) => board.clone(),
            None => PotionsGame::new(settings.potion_count, &settings.generator, &mut rng)?,
        };
        info!(
            "New board with {} units: {}",
            game.total_units(),
            game.get_text_representation()
        );

        let mut buttons = vec![
            Button::new("New", ControlAction::NewGame, Color::new(0.196, 0.588, 0.196, 1.0)),
            Button::new("Restart", ControlAction::Restart, Color::new(0.588, 0.196, 0.196, 1.0)),
        ];
        if settings.undo_enable {
            buttons.push(Button::new("Undo", ControlAction::Undo, Color::new(0.314, 0.314, 0.588, 1.0)));
            buttons.push(Button::new("Redo", ControlAction::Redo, Color::new(0.784, 0.784, 0.0, 1.0)));
        }

        Ok(Self {
            starting_game: game.clone(),
            game,
            generator: settings.generator.clone(),
            potion_count: settings.potion_count,
            rng,
            buttons,
            undo_enable: settings.undo_enable,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        })
    }

    pub fn game(&self) -> &PotionsGame {
        &self.game
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    #[allow(dead_code)]
    pub fn can_undo(&self) -> bool {
        self.undo_enable && !self.undo_stack.is_empty()
    }

    #[allow(dead_code)]
    pub fn can_redo(&self) -> bool {
        self.undo_enable && !self.redo_stack.is_empty()
    }

    pub fn handle_hit_item(&mut self, item: HitItem) {
        let action = match item {
            HitItem::Button { index } => self.buttons.get(index).map(Button::get_action),
            HitItem::Potion { index } => self.action_for_potion_click(index),
        };
        if let Some(action) = action {
            self.handle_game_action(action);
        }
    }

    /// Closed potions ignore clicks. The first click selects, the second
    /// pours into the clicked potion (or just deselects when it is the same one).
    pub fn action_for_potion_click(&self, index: usize) -> Option<ControlAction> {
        let clicked = self.game.potion(index)?;
        if clicked.is_closed() {
            return None;
        }
        match self.game.get_selected() {
            None => Some(ControlAction::SelectPotion(index)),
            Some(selected) if selected == index => Some(ControlAction::Deselect),
            Some(selected) => Some(ControlAction::PourInto(selected, index)),
        }
    }

    pub fn handle_game_action(&mut self, action: ControlAction) {
        debug!("Handling {action:?}");
        match action {
            ControlAction::SelectPotion(index) => {
                self.game.set_selected(Some(index));
            }
            ControlAction::Deselect => {
                self.game.set_selected(None);
            }
            ControlAction::PourInto(from, to) => {
                if self.game.could_move(from, to) {
                    let was_solved = self.game.is_solved();
                    self.push_undo_state();
                    self.game.move_contents(from, to);
                    if !was_solved && self.game.is_solved() {
                        info!("Puzzle solved: {}", self.game.get_text_representation());
                    }
                }
                self.game.set_selected(None);
            }
            ControlAction::Undo => {
                self.undo();
            }
            ControlAction::Redo => {
                self.redo();
            }
            ControlAction::Restart => {
                self.push_undo_state();
                self.load_game(self.starting_game.clone());
            }
            ControlAction::NewGame => {
                match PotionsGame::new(self.potion_count, &self.generator, &mut self.rng) {
                    Ok(game) => {
                        info!("New board: {}", game.get_text_representation());
                        self.starting_game = game.clone();
                        self.load_game(game);
                        self.undo_stack.clear();
                        self.redo_stack.clear();
                    }
                    Err(err) => error!("Could not deal a new board: {err}"),
                }
            }
        }
    }

    fn load_game(&mut self, game: PotionsGame) {
        self.game = game;
        self.game.set_selected(None);
    }

    fn push_undo_state(&mut self) {
        if self.undo_enable {
            self.undo_stack.push(self.game.clone());
            self.redo_stack.clear();
        }
    }

    fn undo(&mut self) {
        if self.undo_enable && let Some(previous) = self.undo_stack.pop() {
            self.redo_stack.push(self.game.clone());
            self.load_game(previous);
        }
    }

    fn redo(&mut self) {
        if self.undo_enable && let Some(next) = self.redo_stack.pop() {
            self.undo_stack.push(self.game.clone());
            self.load_game(next);
        }
    }
}

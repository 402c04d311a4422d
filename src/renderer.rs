use macroquad::prelude::*;

use crate::game::PotionsGame;
use crate::gameplay::{Button, HitItem};
use crate::model::{Liquid, POTION_CAPACITY, Potion};

pub const LIQUID_COLORS: [Color; 9] = [
    Color::new(0.314, 0.314, 0.588, 1.0), //BLUE
    Color::new(0.588, 0.196, 0.196, 1.0), //RED
    Color::new(0.196, 0.588, 0.196, 1.0), //GREEN
    Color::new(0.784, 0.784, 0.0  , 1.0), //YELLOW
    Color::new(0.627, 0.125, 0.941, 1.0), //PURPLE
    Color::new(1.0  , 0.647, 0.0  , 1.0), //ORANGE
    Color::new(0.0  , 1.0  , 1.0  , 1.0), //CYAN
    Color::new(1.0  , 0.752, 0.796, 1.0), //PINK
    Color::new(0.647, 0.164, 0.164, 1.0), //BROWN
];

const BACKGROUND: Color = Color::new(0.235, 0.157, 0.157, 1.0);

pub fn liquid_color(liquid: Liquid) -> Option<Color> {
    match liquid {
        Liquid::Empty => None,
        Liquid::Color { id } => {
            let slot = usize::from(id).saturating_sub(1) % LIQUID_COLORS.len();
            Some(LIQUID_COLORS[slot])
        }
    }
}

/// Splits `rect` into `count` equally sized cells, `columns` per row, filled row by row.
pub fn grid_cells(count: usize, columns: usize, spacing: f32, rect: Rect) -> Vec<Rect> {
    if count == 0 || columns == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(columns);
    let cell_w = (rect.w - spacing * (columns as f32 - 1.0)) / columns as f32;
    let cell_h = (rect.h - spacing * (rows as f32 - 1.0)) / rows as f32;
    (0..count)
        .map(|i| {
            let (row, col) = (i / columns, i % columns);
            Rect::new(
                rect.x + col as f32 * (cell_w + spacing),
                rect.y + row as f32 * (cell_h + spacing),
                cell_w,
                cell_h,
            )
        })
        .collect()
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub rect: Rect,
    pub item: HitItem,
    pub order: usize,
}

#[derive(Default)]
pub struct HitTestRegistry {
    items: Vec<HitRecord>,
}

impl HitTestRegistry {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push(&mut self, rect: Rect, item: HitItem, order: usize) {
        self.items.push(HitRecord { rect, item, order });
    }

    /// Returns the topmost item under the point (highest draw order).
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&HitRecord> {
        self.items
            .iter()
            .filter(|r| r.rect.contains(vec2(x, y)))
            .max_by_key(|r| r.order)
    }
}

pub struct Renderer {
    hit_test: HitTestRegistry,
    draw_order: usize,
    columns: usize,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}
impl Renderer {
    pub fn new(columns: usize) -> Self {
        Self {
            hit_test: HitTestRegistry::new(),
            draw_order: 0,
            columns,
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    fn next_order(&mut self) -> usize {
        let o = self.draw_order;
        self.draw_order += 1;
        o
    }

    pub fn get_hit_test_registry(&self) -> &HitTestRegistry {
        &self.hit_test
    }

    pub fn set_viewport(&mut self, x: f32, y: f32, width: f32, height: f32) -> bool {
        if self.x == x && self.y == y && self.width == width && self.height == height {
            return false;
        }
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        true
    }

    pub fn autoset_viewport(&mut self) -> bool {
        self.set_viewport(0.0, 0.0, screen_width(), screen_height())
    }

    pub fn render_game(&mut self, game: &PotionsGame, buttons: &[Button]) {
        // New frame: reset hit-test registry and draw order.
        self.hit_test.clear();
        self.draw_order = 0;

        clear_background(BACKGROUND);
        let area_padding = 10.0;
        let button_area_height = self.height * 0.1;
        let potion_area_height = self.height - button_area_height - 2.0 * area_padding;
        self.render_button_lineup(
            buttons,
            Rect::new(self.x, self.y, self.width, button_area_height),
        );
        let potion_area = Rect::new(
            self.x + area_padding,
            self.y + button_area_height + area_padding,
            self.width - 2.0 * area_padding,
            potion_area_height,
        );
        self.render_potion_grid(game.potions(), potion_area);
        if game.is_solved() {
            self.render_text("Solved!", potion_area, WHITE);
        }
    }

    pub fn render_text(&self, text: &str, rect: Rect, color: Color) {
        let font_size = (rect.h * 0.5).clamp(8.0, 96.0) as u16;
        let dims = measure_text(text, None, font_size, 1.0);
        let x = rect.x + (rect.w - dims.width) / 2.0;
        let y = rect.y + (rect.h + dims.offset_y) / 2.0;
        draw_text(text, x, y, font_size as f32, color);
    }

    pub fn render_potion(&mut self, potion: &Potion, index: usize, cell: Rect) {
        let order = self.next_order();
        self.hit_test.push(cell, HitItem::Potion { index }, order);

        let width = cell.w.min(cell.h * 0.4);
        let mut rect = Rect::new(cell.x + (cell.w - width) / 2.0, cell.y, width, cell.h);
        if potion.is_selected() {
            rect.y -= cell.h * 0.05;
        }

        let slot_height = rect.h / POTION_CAPACITY as f32;
        for i in 0..POTION_CAPACITY {
            if let Some(color) = liquid_color(potion.slot(i)) {
                let slot_y = rect.y + rect.h - (i as f32 + 1.0) * slot_height;
                draw_rectangle(rect.x, slot_y, rect.w, slot_height, color);
            }
        }
        let outline = if potion.is_closed() {
            GOLD
        } else if potion.is_selected() {
            WHITE
        } else {
            LIGHTGRAY
        };
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 3.0, outline);
    }

    pub fn render_potion_grid(&mut self, potions: &[Potion], rect: Rect) {
        let cells = grid_cells(potions.len(), self.columns, 10.0, rect);
        for (index, (potion, cell)) in potions.iter().zip(cells).enumerate() {
            self.render_potion(potion, index, cell);
        }
    }

    pub fn render_button(&mut self, button: &Button, index: usize, rect: Rect) {
        let order = self.next_order();
        self.hit_test.push(rect, HitItem::Button { index }, order);

        draw_rectangle(rect.x, rect.y, rect.w, rect.h, button.get_color());
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, BLACK);
        self.render_text(button.get_label(), rect, WHITE);
    }

    pub fn render_button_lineup(&mut self, buttons: &[Button], rect: Rect) {
        let cells = grid_cells(buttons.len(), buttons.len(), 10.0, rect);
        for (i, (button, cell)) in buttons.iter().zip(cells).enumerate() {
            self.render_button(button, i, cell);
        }
    }
}

//! Character-grid projection of a snapshot
//!
//! Used by the native runner for headless output. Each cell covers a fixed
//! block of playfield pixels; later layers overwrite earlier ones.

use glam::Vec2;

use super::Snapshot;
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::Tint;

/// Character grid covering the whole playfield
pub struct TextFrame {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl TextFrame {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    /// Fill every cell touched by the box
    fn fill(&mut self, pos: Vec2, size: Vec2, glyph: char) {
        let sx = self.cols as f32 / PLAYFIELD_WIDTH;
        let sy = self.rows as f32 / PLAYFIELD_HEIGHT;
        let x0 = (pos.x * sx).floor().max(0.0) as usize;
        let y0 = (pos.y * sy).floor().max(0.0) as usize;
        let x1 = (((pos.x + size.x) * sx).ceil().max(0.0) as usize).min(self.cols);
        let y1 = (((pos.y + size.y) * sy).ceil().max(0.0) as usize).min(self.rows);
        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[y * self.cols + x] = glyph;
            }
        }
    }

    pub fn draw(&mut self, snapshot: &Snapshot) {
        self.cells.fill(' ');
        for barrier in &snapshot.barriers {
            self.fill(barrier.pos, barrier.size, '#');
        }
        if snapshot.bonus.active {
            self.fill(snapshot.bonus.pos, snapshot.bonus.size, 'U');
        }
        for enemy in &snapshot.enemies {
            self.fill(enemy.pos, enemy.size, tint_glyph(enemy.tint));
        }
        if snapshot.player.lives > 0 {
            self.fill(snapshot.player.pos, snapshot.player.size, 'A');
        }
        for bullet in &snapshot.bullets {
            self.fill(bullet.pos, bullet.size, '|');
        }
        for bullet in &snapshot.enemy_bullets {
            self.fill(bullet.pos, bullet.size, '!');
        }
    }

    pub fn to_string_with_hud(&self, snapshot: &Snapshot) -> String {
        let mut out = String::with_capacity((self.cols + 1) * (self.rows + 1));
        out.push_str(&snapshot.hud_line());
        out.push('\n');
        for row in self.cells.chunks(self.cols) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

fn tint_glyph(tint: Tint) -> char {
    match tint {
        Tint::Red => 'n',
        Tint::Cyan => 'a',
        Tint::Magenta => 'B',
        Tint::Yellow => 's',
    }
}

/// Render a snapshot to text in one call
pub fn render(snapshot: &Snapshot, cols: usize, rows: usize) -> String {
    let mut frame = TextFrame::new(cols, rows);
    frame.draw(snapshot);
    frame.to_string_with_hud(snapshot)
}

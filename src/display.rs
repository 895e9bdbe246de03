/// Rendering layer. All terminal output lives here.
///
/// The simulation works in world units (pixels of a 1200×800 screen by
/// default).  This renderer scales world rectangles onto terminal cells:
/// row 0 is the HUD, the last row is the controls hint, everything between
/// is the play field.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use alien_invasion::kinematics::{Rect, Vec2};
use alien_invasion::render::{HudLabel, Renderer, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Black;
const C_HUD_LIVES: Color = Color::DarkRed;
const C_SHIP: Color = Color::DarkBlue;
const C_ENEMY: Color = Color::DarkGreen;
const C_BULLET: Color = Color::DarkGrey;
const C_SPECIAL_BULLET: Color = Color::DarkMagenta;
const C_BUTTON_BG: Color = Color::DarkGreen;
const C_BUTTON_FG: Color = Color::White;
const C_BANNER: Color = Color::DarkRed;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str = "← → : Move   SPACE : Shoot   B/END : Best shot   P : Play   0 : Pause   Q : Quit";

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    world_width: f32,
    world_height: f32,
    background: Color,
    /// Where the play button landed on screen, for centring its label.
    button_cells: Option<(u16, u16, u16, u16)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16, world_width: f32, world_height: f32) -> Self {
        TerminalRenderer {
            out,
            cols,
            rows,
            world_width,
            world_height,
            background: Color::Reset,
            button_cells: None,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    fn field_rows(&self) -> f32 {
        f32::from(self.rows.saturating_sub(2).max(1))
    }

    fn col_scale(&self) -> f32 {
        f32::from(self.cols.max(1)) / self.world_width
    }

    fn row_scale(&self) -> f32 {
        self.field_rows() / self.world_height
    }

    /// Map a terminal cell back to the world point at its centre.
    pub fn cell_to_world(&self, col: u16, row: u16) -> Vec2 {
        let x = (f32::from(col) + 0.5) / self.col_scale();
        let y = (f32::from(row.saturating_sub(1)) + 0.5) / self.row_scale();
        Vec2::new(x, y)
    }

    /// Cell span `(col0, col1, row0, row1)`, end-exclusive, covering `rect`.
    /// Every visible rectangle covers at least one cell.
    fn cells_for(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let (sx, sy) = (self.col_scale(), self.row_scale());
        let max_col = f32::from(self.cols);
        let max_row = self.field_rows();

        let c0 = (rect.left() * sx).floor().max(0.0);
        let c1 = (rect.right() * sx).ceil().min(max_col).max(c0 + 1.0);
        let r0 = (rect.top() * sy).floor().max(0.0);
        let r1 = (rect.bottom() * sy).ceil().min(max_row).max(r0 + 1.0);
        if c0 >= max_col || r0 >= max_row || rect.right() <= 0.0 || rect.bottom() <= 0.0 {
            return None;
        }
        Some((c0 as u16, c1 as u16, r0 as u16 + 1, r1 as u16 + 1))
    }

    fn fill(&mut self, cells: (u16, u16, u16, u16), glyph: char) -> std::io::Result<()> {
        let (c0, c1, r0, r1) = cells;
        let line: String = std::iter::repeat(glyph).take(usize::from(c1 - c0)).collect();
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn print_centered(&mut self, row: u16, text: &str) -> std::io::Result<()> {
        let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(Print(text))?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = std::io::Error;

    fn clear(&mut self, background: [u8; 3]) -> std::io::Result<()> {
        let [r, g, b] = background;
        self.background = Color::Rgb { r, g, b };
        self.button_cells = None;
        self.out.queue(style::SetBackgroundColor(self.background))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_entity(&mut self, sprite: Sprite, rect: &Rect) -> std::io::Result<()> {
        let Some(cells) = self.cells_for(rect) else {
            return Ok(());
        };
        match sprite {
            Sprite::Ship => {
                self.out.queue(style::SetForegroundColor(C_SHIP))?;
                self.fill(cells, '▲')?;
            }
            Sprite::Enemy => {
                self.out.queue(style::SetForegroundColor(C_ENEMY))?;
                self.fill(cells, '▼')?;
            }
            Sprite::Bullet => {
                self.out.queue(style::SetForegroundColor(C_BULLET))?;
                self.fill(cells, '║')?;
            }
            Sprite::SpecialBullet => {
                self.out.queue(style::SetForegroundColor(C_SPECIAL_BULLET))?;
                self.fill(cells, '═')?;
            }
            Sprite::PlayButton => {
                self.out.queue(style::SetBackgroundColor(C_BUTTON_BG))?;
                self.fill(cells, ' ')?;
                self.out.queue(style::SetBackgroundColor(self.background))?;
                self.button_cells = Some(cells);
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, label: HudLabel, value: &str) -> std::io::Result<()> {
        let third = self.cols / 3;
        match label {
            // Left third: score and high score
            HudLabel::Score => {
                self.out.queue(style::SetForegroundColor(C_HUD))?;
                self.out.queue(cursor::MoveTo(1, 0))?;
                self.out.queue(Print(format!("Score:{value:>8}")))?;
            }
            HudLabel::HighScore => {
                self.out.queue(style::SetForegroundColor(C_HUD))?;
                self.out.queue(cursor::MoveTo(17, 0))?;
                self.out.queue(Print(format!("Hi:{value:>8}")))?;
            }
            // Middle third: level and wave
            HudLabel::Level => {
                self.out.queue(style::SetForegroundColor(C_HUD))?;
                self.out.queue(cursor::MoveTo(third, 0))?;
                self.out.queue(Print(format!("Level {value}")))?;
            }
            HudLabel::Wave => {
                self.out.queue(style::SetForegroundColor(C_HUD))?;
                self.out.queue(cursor::MoveTo(third + 12, 0))?;
                self.out.queue(Print(format!("Wave {value}")))?;
            }
            HudLabel::Play => {
                let row = match self.button_cells {
                    Some((_, _, r0, r1)) => r0 + (r1 - r0) / 2,
                    None => self.rows / 2,
                };
                self.out.queue(style::SetBackgroundColor(C_BUTTON_BG))?;
                self.out.queue(style::SetForegroundColor(C_BUTTON_FG))?;
                self.print_centered(row, value)?;
                self.out.queue(style::SetBackgroundColor(self.background))?;
            }
            HudLabel::GameOver => {
                let row = (self.rows / 2).saturating_sub(3);
                self.out.queue(style::SetForegroundColor(C_BANNER))?;
                self.print_centered(row, &format!("╔═ {value} ═╗"))?;
            }
            HudLabel::Paused => {
                let row = self.rows / 2;
                self.out.queue(style::SetForegroundColor(C_BANNER))?;
                self.print_centered(row, value)?;
            }
        }
        Ok(())
    }

    /// Right edge of the HUD row: one heart per ship.
    fn draw_lives(&mut self, ships: u32) -> std::io::Result<()> {
        let text = format!("Ships:{}", "♥".repeat(ships as usize));
        let col = self.cols.saturating_sub(text.chars().count() as u16 + 1);
        self.out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
        self.out.queue(cursor::MoveTo(col, 0))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(HINT))?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

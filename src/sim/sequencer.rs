/// Stage sequencer: drives the burn from blank paper to the final message.
///
/// All per-run state (box, palette, glyph cycles, writer) lives in `Burn`,
/// created fresh for each call to `run`. Frames come from
/// `schedule::choreography`; each one is drawn, presented, then paused.
///
/// Box rows, relative to `origin_row`:
///   0 top border · 1 name · 2 bottom border · 3 spill

use tracing::{debug, info};

use crate::domain::geometry::{AnimationBox, PAD_X};
use crate::domain::glyph::Glyphs;
use crate::domain::palette::{Palette, Role};
use crate::sim::error::BurnError;
use crate::sim::schedule::{self, FrameEntry, Stage};
use crate::ui::clock::Clock;
use crate::ui::surface::{SafeWriter, Surface};

const H_LINE: &str = "─";
const V_LINE: &str = "│";
const TOP_LEFT: &str = "┌";
const TOP_RIGHT: &str = "┐";
const BOTTOM_LEFT: &str = "└";
const BOTTOM_RIGHT: &str = "┘";

/// Ember colour modulus on frame 0; red when `k % modulus <= 1`.
const EMBER_MODULUS_BASE: usize = 3;

const TOO_SMALL_MSG: &str = "Terminal too small for animation.";
const FAREWELL_MSG: &str = "May your worries dissipate with it.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every stage ran and the closing key was read.
    Completed,
    /// The box did not fit; only the warning was shown.
    TooSmall,
}

/// First line of the closing screen. Uses the full, untruncated name.
pub fn ash_message(filename: &str) -> String {
    format!("🔥 '{filename}' has been turned to digital ash. 🔥")
}

/// Play the whole animation for `filename` and wait for one key.
///
/// Cell-level write failures are absorbed; a failing clear, flush or key
/// read ends the run with `BurnError::Surface`.
pub fn run<S: Surface, C: Clock>(
    surface: S,
    clock: &mut C,
    palette: &Palette,
    filename: &str,
) -> Result<Outcome, BurnError> {
    let (cols, rows) = surface.size();
    let mut writer = SafeWriter::new(surface, palette.get(Role::Default));

    let area = match AnimationBox::resolve(cols, rows, filename) {
        Ok(area) => area,
        Err(too_small) => {
            info!(?too_small, "terminal too small, skipping animation");
            for entry in schedule::too_small() {
                writer.clear_all()?;
                let warning = palette.get(Role::FlameRed);
                writer.write_centered(rows as usize / 2, TOO_SMALL_MSG, warning);
                writer.present()?;
                clock.sleep(entry.pause);
            }
            return Ok(Outcome::TooSmall);
        }
    };
    debug!(
        width = area.width,
        origin_row = area.origin_row,
        origin_col = area.origin_col,
        name = %area.display_name,
        "box placed"
    );

    writer.clear_all()?;
    writer.present()?;

    let mut burn = Burn {
        glyphs: Glyphs::new(palette),
        palette,
        area,
        filename,
        writer,
    };

    for entry in schedule::choreography(burn.area.name_len) {
        burn.draw(entry)?;
        burn.writer.present()?;
        clock.sleep(entry.pause);
    }

    burn.writer.wait_for_key()?;
    debug!(dropped = burn.writer.dropped(), "animation finished");
    Ok(Outcome::Completed)
}

/// Run-scoped drawing context shared by every stage.
struct Burn<'a, S: Surface> {
    writer: SafeWriter<S>,
    palette: &'a Palette,
    glyphs: Glyphs,
    area: AnimationBox,
    filename: &'a str,
}

impl<S: Surface> Burn<'_, S> {
    fn draw(&mut self, entry: FrameEntry) -> Result<(), BurnError> {
        match entry.stage {
            Stage::TooSmall => {}
            Stage::DrawPaper => self.draw_paper(),
            Stage::Ignition => self.draw_ignition(entry.frame),
            Stage::Consumption => self.draw_consumption(entry.frame + 1),
            Stage::FullBurn => self.draw_full_burn(entry.frame),
            Stage::Embers => self.draw_embers(entry.frame),
            Stage::Ashes => self.draw_ashes(entry.frame),
            Stage::FinalMessage => self.draw_final(entry.frame)?,
        }
        Ok(())
    }

    // ── Primitives ──

    /// `count` flame glyphs left to right from `col`. Cells that fall off
    /// screen still pull from the cycles.
    fn flame_run(&mut self, row: usize, col: usize, count: usize) {
        for k in 0..count {
            let (ch, attr) = self.glyphs.next_flame();
            self.writer.write_char(row, col + k, ch, attr);
        }
    }

    fn border_line(&self, left: &str, right: &str) -> String {
        format!("{left}{}{right}", H_LINE.repeat(self.area.name_len + PAD_X * 2))
    }

    fn draw_top_border(&mut self) {
        let line = self.border_line(TOP_LEFT, TOP_RIGHT);
        let attr = self.palette.get(Role::PaperBorder);
        self.writer.write_at(self.area.row(0), self.area.origin_col, &line, attr);
    }

    // ── Stages ──

    fn draw_paper(&mut self) {
        let border = self.palette.get(Role::PaperBorder);
        let text = self.palette.get(Role::PaperText);
        let bottom = self.border_line(BOTTOM_LEFT, BOTTOM_RIGHT);

        self.writer.clear_region(&self.area);
        self.draw_top_border();

        let a = &self.area;
        self.writer.write_at(a.row(1), a.origin_col, V_LINE, border);
        self.writer.write_at(a.row(1), a.name_col(), &a.display_name, text);
        self.writer.write_at(a.row(1), a.right_bar_col(), V_LINE, border);
        self.writer.write_at(a.row(2), a.origin_col, &bottom, border);
    }

    /// Frame 0: a spark at the bottom-right interior corner.
    /// Frame 1: the spark catches.
    fn draw_ignition(&mut self, frame: usize) {
        let spot = self.area.name_col() + self.area.name_len;
        let (edge, below) = (self.area.row(2), self.area.row(3));

        if frame == 0 {
            let spark = self.palette.get(Role::FlameYellow).bold();
            self.writer.write_at(edge, spot, ".", spark);
            self.writer.write_at(below, spot + 1, "'", spark);
            return;
        }

        let (ch, attr) = self.glyphs.next_flame();
        self.writer.write_char(edge, spot, ch, attr);
        self.writer.write_at(below, spot, " ", self.palette.get(Role::Default));
        let (ch, attr) = self.glyphs.next_flame();
        self.writer.write_char(below, spot + 1, ch, attr);
    }

    /// Iteration `i` (1-based): the last `i` name chars are burning, the
    /// bottom border burns from the right a quarter-name ahead, and a
    /// cluster of flames hangs under the paper.
    fn draw_consumption(&mut self, i: usize) {
        let n = self.area.name_len;
        let i = i.min(n);
        let name_col = self.area.name_col();
        let border = self.palette.get(Role::PaperBorder);
        let text = self.palette.get(Role::PaperText);

        self.writer.clear_region(&self.area);
        self.draw_top_border();

        // Name row
        let row = self.area.row(1);
        let unburnt = self.area.name_prefix(n - i);
        self.writer.write_at(row, self.area.origin_col, V_LINE, border);
        self.writer.write_at(row, name_col, &unburnt, text);
        self.flame_run(row, name_col + (n - i), i);
        self.writer.write_at(row, self.area.right_bar_col(), V_LINE, border);

        // Bottom border, left cap + solid run + burning run + right cap
        let row = self.area.row(2);
        let consumed = n.min(i + n / 4);
        let solid = n - consumed;
        let left_cap = format!("{BOTTOM_LEFT}{}", H_LINE.repeat(PAD_X));
        let right_cap = format!("{}{BOTTOM_RIGHT}", H_LINE.repeat(PAD_X));
        self.writer.write_at(row, self.area.origin_col, &left_cap, border);
        if solid > 0 {
            self.writer.write_at(row, name_col, &H_LINE.repeat(solid), border);
        }
        self.flame_run(row, name_col + solid, consumed);
        self.writer.write_at(row, name_col + n, &right_cap, border);

        // Spill, centered under the name (may lean one column left of it)
        let count = (n / 2 + 2).min(i + 1);
        let offset = (n as isize - count as isize).div_euclid(2);
        let start = (name_col as isize + offset).max(0) as usize;
        self.flame_run(self.area.row(3), start, count);
    }

    /// The whole box is flame; rows shrink by one column on alternating
    /// frames so the mass flickers.
    fn draw_full_burn(&mut self, frame: usize) {
        let w = self.area.width;
        let col = self.area.origin_col;
        let odd = frame % 2;
        let even = (frame + 1) % 2;
        let third = frame % 3;

        self.writer.clear_region(&self.area);
        for (r, jitter) in [(0, odd), (1, even), (2, odd)] {
            self.flame_run(self.area.row(r), col + jitter / 2, w.saturating_sub(jitter));
        }

        let spill = (w / 2 + 1).saturating_sub(third).max(1);
        let spill_start = col + w.saturating_sub(spill) / 2;
        self.flame_run(self.area.row(3), spill_start, spill);
    }

    fn draw_embers(&mut self, frame: usize) {
        let red = self.palette.get(Role::EmberRed);
        let grey = self.palette.get(Role::EmberDarkGrey);
        let start = self.area.interior_col();
        let width = self.area.interior_width();
        // Wider modulus each frame: fewer red embers as the pile cools.
        let modulus = EMBER_MODULUS_BASE + frame;

        self.writer.clear_region(&self.area);
        for r in [1, 2] {
            let row = self.area.row(r);
            for k in 0..width {
                let glowing = k % modulus <= 1 || (frame < 2 && k % 2 == 0);
                let ch = self.glyphs.next_ember();
                self.writer.write_char(row, start + k, ch, if glowing { red } else { grey });
            }
        }

        let center = self.area.center_col();
        for (r, col) in [(0, center), (3, center - 1), (3, center + 1)] {
            let ch = self.glyphs.next_ember();
            self.writer.write_char(self.area.row(r), col, ch, grey);
        }
    }

    /// The pile narrows by two columns per frame while a light scatter
    /// below it thins out.
    fn draw_ashes(&mut self, frame: usize) {
        let dark = self.palette.get(Role::AshDark);
        let light = self.palette.get(Role::AshLight);
        let base = self.area.interior_width();
        let width = base.saturating_sub(frame * 2);

        self.writer.clear_region(&self.area);
        if width == 0 && frame > 0 {
            return;
        }

        let start = self.area.interior_col() + (base - width) / 2;
        for r in [1, 2] {
            let row = self.area.row(r);
            for k in 0..width {
                let ch = self.glyphs.next_ash();
                self.writer.write_char(row, start + k, ch, dark);
            }
        }

        let scatter_base = self.area.name_len / 2 + 1;
        let scatter = scatter_base.saturating_sub(frame);
        if scatter > 0 {
            let start = self.area.center_col() - scatter_base / 2 + (scatter_base - scatter) / 2;
            let row = self.area.row(3);
            for k in 0..scatter {
                let ch = self.glyphs.next_ash();
                self.writer.write_char(row, start + k, ch, light);
            }
            if frame < schedule::ASH_FRAMES - 1 {
                self.writer.write_at(row, self.area.center_col(), ".", dark);
            }
        }
    }

    /// Frame 0: the box fades out. Frame 1: the closing screen.
    fn draw_final(&mut self, frame: usize) -> Result<(), BurnError> {
        if frame == 0 {
            self.writer.clear_region(&self.area);
            return Ok(());
        }

        self.writer.clear_all()?;
        let mid = self.writer.rows() / 2;
        let headline = ash_message(self.filename);
        let attr = self.palette.get(Role::FinalMessage).bold();
        self.writer.write_centered(mid.saturating_sub(1), &headline, attr);
        self.writer.write_centered(mid, FAREWELL_MSG, self.palette.get(Role::PaperText));
        Ok(())
    }
}

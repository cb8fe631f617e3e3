/// Live crossterm surface.
///
/// `init` puts the terminal in raw mode on the alternate screen with the
/// cursor hidden; `cleanup` undoes all of it. Writes are batched with
/// `queue!` and flushed once per frame in `present`.
///
/// `Drop` runs `cleanup` if it has not run yet, so the cursor comes back
/// even when a stage unwinds.

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use crossterm::{
    cursor::{self, MoveTo},
    event::{self, poll, Event, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use tracing::{debug, warn};

use crate::domain::palette::Attr;
use crate::ui::surface::Surface;

pub struct CrosstermSurface {
    writer: BufWriter<io::Stdout>,
    cols: u16,
    rows: u16,
    active: bool,
}

impl CrosstermSurface {
    pub fn new() -> Self {
        CrosstermSurface {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            cols: 0,
            rows: 0,
            active: false,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            ResetColor,
            Clear(ClearType::All)
        )?;

        let (cols, rows) = terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        debug!(cols, rows, "terminal ready");
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.writer,
            SetAttribute(Attribute::Reset),
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Discard keys typed while the animation was playing.
    fn drain_events(&mut self) -> io::Result<()> {
        while poll(Duration::ZERO)? {
            event::read()?;
        }
        Ok(())
    }
}

impl Default for CrosstermSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            warn!(error = %e, "terminal restore failed");
        }
    }
}

impl Surface for CrosstermSurface {
    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn put(&mut self, row: u16, col: u16, text: &str, attr: Attr) -> io::Result<()> {
        queue!(self.writer, MoveTo(col, row), SetAttribute(Attribute::Reset))?;
        match attr.fg {
            Some(color) => queue!(self.writer, SetForegroundColor(color))?,
            None => queue!(self.writer, ResetColor)?,
        }
        if attr.bold {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.writer, Print(text))
    }

    fn clear_all(&mut self) -> io::Result<()> {
        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Clear(ClearType::All)
        )
    }

    fn present(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn wait_for_key(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.drain_events()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

/// Display attributes and the role → attribute palette.
///
/// Resolved once before the box exists from the terminal's colour depth.
/// A depth that cannot show colour degrades every role to the default
/// foreground (boldness is kept), so resolution never fails.

use crossterm::style::Color;

/// Foreground colour plus boldness. `fg: None` = terminal default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attr {
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Attr {
    pub const DEFAULT: Attr = Attr { fg: None, bold: false };

    pub const fn fg(color: Color) -> Self {
        Attr { fg: Some(color), bold: false }
    }

    pub const fn bold(self) -> Self {
        Attr { fg: self.fg, bold: true }
    }
}

impl Default for Attr {
    fn default() -> Self {
        Attr::DEFAULT
    }
}

/// How many colours the terminal can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorDepth {
    None,
    /// 8 ANSI colours.
    Basic,
    /// 256-colour palette (or better).
    Extended,
}

impl ColorDepth {
    /// Probe the environment: `NO_COLOR`, then `COLORTERM`, then `TERM`.
    pub fn detect() -> Self {
        Self::detect_from(
            std::env::var_os("NO_COLOR").is_some(),
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    pub fn detect_from(no_color: bool, colorterm: Option<&str>, term: Option<&str>) -> Self {
        if no_color {
            return ColorDepth::None;
        }
        let rich = |s: &str| {
            let s = s.to_ascii_lowercase();
            s.contains("256color") || s.contains("truecolor") || s.contains("24bit")
        };
        match (colorterm, term) {
            (Some(ct), _) if rich(ct) => ColorDepth::Extended,
            (_, Some(t)) if rich(t) => ColorDepth::Extended,
            (_, Some("dumb")) => ColorDepth::None,
            _ => ColorDepth::Basic,
        }
    }

    /// Parse a config value: `"256"`, `"8"` or `"none"`.
    pub fn from_setting(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "256" | "extended" | "truecolor" => Some(ColorDepth::Extended),
            "8" | "basic" => Some(ColorDepth::Basic),
            "none" | "off" | "mono" => Some(ColorDepth::None),
            _ => None,
        }
    }
}

/// Semantic drawing roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Default,
    PaperBorder,
    PaperText,
    FlameRed,
    FlameOrange,
    FlameYellow,
    EmberRed,
    EmberDarkGrey,
    AshDark,
    AshLight,
    Status,
    FinalMessage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    depth: ColorDepth,
}

impl Palette {
    pub fn resolve(depth: ColorDepth) -> Self {
        Palette { depth }
    }

    pub fn depth(&self) -> ColorDepth {
        self.depth
    }

    pub fn get(&self, role: Role) -> Attr {
        let extended = self.depth == ColorDepth::Extended;
        let orange = if extended { Color::AnsiValue(208) } else { Color::Yellow };
        let dark_grey = if extended { Color::DarkGrey } else { Color::Black };

        let attr = match role {
            Role::Default | Role::PaperBorder | Role::AshLight => Attr::fg(Color::White),
            Role::PaperText => Attr::fg(Color::White).bold(),
            Role::FlameRed | Role::EmberRed => Attr::fg(Color::Red),
            Role::FlameOrange | Role::FinalMessage => Attr::fg(orange),
            Role::FlameYellow => Attr::fg(Color::Yellow),
            Role::EmberDarkGrey | Role::AshDark => Attr::fg(dark_grey),
            Role::Status => Attr::fg(Color::Cyan).bold(),
        };

        match self.depth {
            ColorDepth::None => Attr { fg: None, bold: attr.bold },
            _ => attr,
        }
    }

    /// Warm rotation for flames: red, orange, yellow, orange.
    pub fn flame_colors(&self) -> Vec<Attr> {
        vec![
            self.get(Role::FlameRed),
            self.get(Role::FlameOrange),
            self.get(Role::FlameYellow),
            self.get(Role::FlameOrange),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_prefers_no_color() {
        assert_eq!(ColorDepth::detect_from(true, Some("truecolor"), None), ColorDepth::None);
        assert_eq!(ColorDepth::detect_from(false, Some("truecolor"), None), ColorDepth::Extended);
        assert_eq!(
            ColorDepth::detect_from(false, None, Some("xterm-256color")),
            ColorDepth::Extended
        );
        assert_eq!(ColorDepth::detect_from(false, None, Some("xterm")), ColorDepth::Basic);
        assert_eq!(ColorDepth::detect_from(false, None, Some("dumb")), ColorDepth::None);
        assert_eq!(ColorDepth::detect_from(false, None, None), ColorDepth::Basic);
    }

    #[test]
    fn orange_and_grey_degrade_on_basic_terminals() {
        let rich = Palette::resolve(ColorDepth::Extended);
        let basic = Palette::resolve(ColorDepth::Basic);
        assert_eq!(rich.get(Role::FlameOrange).fg, Some(Color::AnsiValue(208)));
        assert_eq!(basic.get(Role::FlameOrange).fg, Some(Color::Yellow));
        assert_eq!(rich.get(Role::EmberDarkGrey).fg, Some(Color::DarkGrey));
        assert_eq!(basic.get(Role::AshDark).fg, Some(Color::Black));
        assert_eq!(basic.get(Role::FinalMessage), basic.get(Role::FlameOrange));
    }

    #[test]
    fn monochrome_keeps_boldness_only() {
        let p = Palette::resolve(ColorDepth::None);
        assert_eq!(p.get(Role::FlameRed), Attr::DEFAULT);
        assert_eq!(p.get(Role::PaperText), Attr::DEFAULT.bold());
        assert!(p.flame_colors().iter().all(|a| a.fg.is_none()));
    }

    #[test]
    fn flame_rotation_is_warm() {
        let p = Palette::resolve(ColorDepth::Extended);
        let c = p.flame_colors();
        assert_eq!(c.len(), 4);
        assert_eq!(c[0], p.get(Role::FlameRed));
        assert_eq!(c[1], p.get(Role::FlameOrange));
        assert_eq!(c[2], p.get(Role::FlameYellow));
        assert_eq!(c[3], c[1]);
    }

    #[test]
    fn settings_parse() {
        assert_eq!(ColorDepth::from_setting("256"), Some(ColorDepth::Extended));
        assert_eq!(ColorDepth::from_setting(" 8 "), Some(ColorDepth::Basic));
        assert_eq!(ColorDepth::from_setting("NONE"), Some(ColorDepth::None));
        assert_eq!(ColorDepth::from_setting("auto"), None);
    }
}

use crossterm::style::Color;

#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub warning: Color,
    pub user_color: Color,
    pub assistant_color: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            accent: Color::Rgb { r: 122, g: 162, b: 247 },
            muted: Color::Rgb { r: 100, g: 100, b: 100 },
            error: Color::Rgb { r: 247, g: 118, b: 142 },
            warning: Color::Rgb { r: 224, g: 175, b: 104 },
            user_color: Color::Cyan,
            assistant_color: Color::Green,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            accent: Color::DarkBlue,
            muted: Color::DarkGrey,
            error: Color::DarkRed,
            warning: Color::DarkYellow,
            user_color: Color::DarkCyan,
            assistant_color: Color::DarkGreen,
        }
    }

    /// No colors at all, for dumb terminals and piped output.
    pub fn plain() -> Self {
        Self {
            name: "plain",
            accent: Color::Reset,
            muted: Color::Reset,
            error: Color::Reset,
            warning: Color::Reset,
            user_color: Color::Reset,
            assistant_color: Color::Reset,
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "plain" | "none" => Self::plain(),
            _ => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

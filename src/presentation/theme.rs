use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub name: fn(&str) -> String,
    pub meta: fn(&str) -> String,
    pub hours: fn(&str) -> String,
    pub tag: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "temp" | "" => Self::temp(),
            "plain" => Self::plain(),
            "canvas" => Self::canvas(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::temp()
            }
        }
    }

    fn temp() -> Self {
        Self {
            title: |s| s.bright_magenta().italic().bold().underline().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            name: |s| s.yellow().bold().to_string(),
            meta: |s| s.white().to_string(),
            hours: |s| s.cyan().italic().to_string(),
            tag: |s| s.bright_white().dimmed().italic().to_string(),
        }
    }

    fn plain() -> Self {
        Self {
            title: |s| s.bold().to_string(),
            line: |s| s.normal().to_string(),
            idx: |s| s.normal().to_string(),
            name: |s| s.bold().to_string(),
            meta: |s| s.normal().to_string(),
            hours: |s| s.normal().to_string(),
            tag: |s| s.normal().to_string(),
        }
    }

    fn canvas() -> Self {
        Self {
            title: |s| s.blue().bold().underline().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.cyan().to_string(),
            name: |s| s.black().bold().to_string(),
            meta: |s| s.black().to_string(),
            hours: |s| s.magenta().to_string(),
            tag: |s| s.green().italic().to_string(),
        }
    }
}

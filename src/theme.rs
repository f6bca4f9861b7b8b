use ratatui::style::{Color, Modifier, Style};

use crate::calendar::Category;
use crate::preferences::ThemeName;

#[derive(Debug, Clone)]
pub struct Theme {
    pub base: Style,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    pub accent: Style,
}

impl Theme {
    pub fn preset(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Self::light(),
            ThemeName::Dark => Self::dark(),
            ThemeName::Synthwave => Self::synthwave(),
        }
    }

    fn dark() -> Self {
        Self {
            base: Style::default(),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        }
    }

    fn light() -> Self {
        let paper = Color::Rgb(250, 250, 245);
        let ink = Color::Rgb(40, 42, 54);
        Self {
            base: Style::default().fg(ink).bg(paper),
            today: Style::default().fg(ink).bg(Color::Rgb(255, 214, 102)),
            selected: Style::default().fg(paper).bg(Color::Rgb(38, 139, 210)),
            header: Style::default().fg(ink).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(140, 140, 150)),
            border: Style::default().fg(Color::Rgb(180, 180, 190)),
            status: Style::default().fg(ink).bg(Color::Rgb(220, 220, 228)),
            highlight: Style::default()
                .bg(Color::Rgb(220, 230, 245))
                .add_modifier(Modifier::BOLD),
            accent: Style::default()
                .fg(Color::Rgb(38, 139, 210))
                .add_modifier(Modifier::BOLD),
        }
    }

    fn synthwave() -> Self {
        let night = Color::Rgb(38, 20, 71);
        Self {
            base: Style::default().fg(Color::Rgb(240, 230, 255)).bg(night),
            today: Style::default().fg(night).bg(Color::Rgb(254, 222, 93)), // sun
            selected: Style::default().fg(night).bg(Color::Rgb(54, 249, 246)), // neon cyan
            header: Style::default()
                .fg(Color::Rgb(255, 126, 219))
                .add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(132, 139, 189)),
            border: Style::default().fg(Color::Rgb(114, 241, 184)),
            status: Style::default()
                .fg(Color::Rgb(240, 230, 255))
                .bg(Color::Rgb(73, 84, 149)),
            highlight: Style::default()
                .bg(Color::Rgb(73, 84, 149))
                .add_modifier(Modifier::BOLD),
            accent: Style::default()
                .fg(Color::Rgb(255, 126, 219))
                .add_modifier(Modifier::BOLD),
        }
    }
}

pub fn category_color(category: Category) -> Color {
    match category {
        Category::Personal => Color::Rgb(66, 165, 245),
        Category::Work => Color::Rgb(171, 71, 188),
        Category::Finance => Color::Rgb(102, 187, 106),
        Category::Health => Color::Rgb(239, 83, 80),
        Category::Reminder => Color::Rgb(255, 202, 40),
        Category::Other => Color::Rgb(120, 144, 156),
    }
}

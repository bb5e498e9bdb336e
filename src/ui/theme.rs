use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub section_fg: Color,
    pub zebra_bg: Color,
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub overlay_border: Color,
    pub surface_bg: Color,
    pub statusbar_bg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
}

impl Theme {
    pub fn from_config(kind: ThemeKind, support: ColorSupport) -> Theme {
        if support == ColorSupport::Mono {
            return Theme::mono();
        }
        let truecolor = support == ColorSupport::Truecolor;
        match kind {
            ThemeKind::Dark => Theme::dark(truecolor),
            ThemeKind::Light => Theme::light(truecolor),
        }
    }

    fn dark(truecolor: bool) -> Theme {
        if truecolor {
            Theme {
                text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),
                text_secondary: Color::Rgb(0x9a, 0xa2, 0xc0),
                accent: Color::Rgb(0xcb, 0xa6, 0xf7),
                section_fg: Color::Rgb(0x89, 0xb4, 0xfa),
                zebra_bg: Color::Rgb(0x24, 0x27, 0x36),
                header_accent_fg: Color::Rgb(0x1e, 0x1e, 0x2e),
                header_accent_bg: Color::Rgb(0x89, 0xb4, 0xfa),
                overlay_border: Color::Rgb(0x58, 0x5b, 0x70),
                surface_bg: Color::Rgb(0x1e, 0x1e, 0x2e),
                statusbar_bg: Color::Rgb(0x18, 0x18, 0x25),
                status_ok: Color::Rgb(0xa6, 0xe3, 0xa1),
                status_err: Color::Rgb(0xf3, 0x8b, 0xa8),
                pill_key_fg: Color::Rgb(0x1e, 0x1e, 0x2e),
                pill_key_bg: Color::Rgb(0x89, 0xb4, 0xfa),
                pill_desc_fg: Color::Rgb(0x9a, 0xa2, 0xc0),
            }
        } else {
            Theme {
                text_primary: Color::Indexed(189),
                text_secondary: Color::Indexed(146),
                accent: Color::Indexed(183),
                section_fg: Color::Indexed(111),
                zebra_bg: Color::Indexed(235),
                header_accent_fg: Color::Indexed(235),
                header_accent_bg: Color::Indexed(111),
                overlay_border: Color::Indexed(243),
                surface_bg: Color::Indexed(234),
                statusbar_bg: Color::Indexed(233),
                status_ok: Color::Indexed(151),
                status_err: Color::Indexed(211),
                pill_key_fg: Color::Indexed(235),
                pill_key_bg: Color::Indexed(111),
                pill_desc_fg: Color::Indexed(146),
            }
        }
    }

    fn light(truecolor: bool) -> Theme {
        if truecolor {
            Theme {
                text_primary: Color::Rgb(0x4c, 0x4f, 0x69),
                text_secondary: Color::Rgb(0x6c, 0x6f, 0x85),
                accent: Color::Rgb(0x88, 0x39, 0xef),
                section_fg: Color::Rgb(0x1e, 0x66, 0xf5),
                zebra_bg: Color::Rgb(0xe6, 0xe9, 0xef),
                header_accent_fg: Color::Rgb(0xef, 0xf1, 0xf5),
                header_accent_bg: Color::Rgb(0x1e, 0x66, 0xf5),
                overlay_border: Color::Rgb(0x9c, 0xa0, 0xb0),
                surface_bg: Color::Rgb(0xef, 0xf1, 0xf5),
                statusbar_bg: Color::Rgb(0xdc, 0xe0, 0xe8),
                status_ok: Color::Rgb(0x40, 0xa0, 0x2b),
                status_err: Color::Rgb(0xd2, 0x0f, 0x39),
                pill_key_fg: Color::Rgb(0xef, 0xf1, 0xf5),
                pill_key_bg: Color::Rgb(0x1e, 0x66, 0xf5),
                pill_desc_fg: Color::Rgb(0x6c, 0x6f, 0x85),
            }
        } else {
            Theme {
                text_primary: Color::Indexed(239),
                text_secondary: Color::Indexed(243),
                accent: Color::Indexed(129),
                section_fg: Color::Indexed(27),
                zebra_bg: Color::Indexed(254),
                header_accent_fg: Color::Indexed(255),
                header_accent_bg: Color::Indexed(27),
                overlay_border: Color::Indexed(247),
                surface_bg: Color::Indexed(255),
                statusbar_bg: Color::Indexed(253),
                status_ok: Color::Indexed(28),
                status_err: Color::Indexed(160),
                pill_key_fg: Color::Indexed(255),
                pill_key_bg: Color::Indexed(27),
                pill_desc_fg: Color::Indexed(243),
            }
        }
    }

    fn mono() -> Theme {
        Theme {
            text_primary: Color::Reset,
            text_secondary: Color::Reset,
            accent: Color::Reset,
            section_fg: Color::Reset,
            zebra_bg: Color::Reset,
            header_accent_fg: Color::Reset,
            header_accent_bg: Color::Reset,
            overlay_border: Color::Reset,
            surface_bg: Color::Reset,
            statusbar_bg: Color::Reset,
            status_ok: Color::Reset,
            status_err: Color::Reset,
            pill_key_fg: Color::Reset,
            pill_key_bg: Color::Reset,
            pill_desc_fg: Color::Reset,
        }
    }
}

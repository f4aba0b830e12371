use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub overlay_border: Color,
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub table_header_fg: Color,
    pub heat_low: Color,
    pub heat_mid: Color,
    pub heat_high: Color,
    pub statusbar_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
}

impl Theme {
    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(147, 153, 178),
            overlay_border: Color::Rgb(88, 91, 112),
            header_accent_fg: Color::Rgb(30, 30, 46),
            header_accent_bg: Color::Rgb(203, 166, 247),
            gauge_filled: Color::Rgb(137, 180, 250),
            gauge_unfilled: Color::Rgb(49, 50, 68),
            table_header_fg: Color::Rgb(249, 226, 175),
            heat_low: Color::Rgb(166, 227, 161),
            heat_mid: Color::Rgb(249, 226, 175),
            heat_high: Color::Rgb(243, 139, 168),
            statusbar_bg: Color::Rgb(24, 24, 37),
            pill_key_fg: Color::Rgb(30, 30, 46),
            pill_key_bg: Color::Rgb(137, 180, 250),
            pill_desc_fg: Color::Rgb(186, 194, 222),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            text_primary: Color::Rgb(76, 79, 105),
            text_secondary: Color::Rgb(108, 111, 133),
            overlay_border: Color::Rgb(156, 160, 176),
            header_accent_fg: Color::Rgb(239, 241, 245),
            header_accent_bg: Color::Rgb(136, 57, 239),
            gauge_filled: Color::Rgb(30, 102, 245),
            gauge_unfilled: Color::Rgb(204, 208, 218),
            table_header_fg: Color::Rgb(223, 142, 29),
            heat_low: Color::Rgb(64, 160, 43),
            heat_mid: Color::Rgb(223, 142, 29),
            heat_high: Color::Rgb(210, 15, 57),
            statusbar_bg: Color::Rgb(230, 233, 239),
            pill_key_fg: Color::Rgb(239, 241, 245),
            pill_key_bg: Color::Rgb(30, 102, 245),
            pill_desc_fg: Color::Rgb(76, 79, 105),
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            text_primary: Color::White,
            text_secondary: Color::Gray,
            overlay_border: Color::DarkGray,
            header_accent_fg: Color::Black,
            header_accent_bg: Color::White,
            gauge_filled: Color::White,
            gauge_unfilled: Color::DarkGray,
            table_header_fg: Color::White,
            heat_low: Color::Gray,
            heat_mid: Color::White,
            heat_high: Color::White,
            statusbar_bg: Color::Reset,
            pill_key_fg: Color::Black,
            pill_key_bg: Color::White,
            pill_desc_fg: Color::Gray,
        }
    }

    /// Colour for a percentage cell: calm below 25, warm below 75, hot above.
    pub fn heat(&self, percent: f64) -> Color {
        if percent >= 75.0 {
            self.heat_high
        } else if percent >= 25.0 {
            self.heat_mid
        } else {
            self.heat_low
        }
    }
}

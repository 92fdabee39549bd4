use ratatui::style::Color;

/// Dashboard color palette (Gruvbox Material by default)
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg1: Color,
    pub fg0: Color,
    pub fg1: Color,
    pub grey: Color,
    pub accent: Color,
    pub selection: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x7d, 0xae, 0xa3),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            error: Color::Rgb(0xea, 0x69, 0x62),
            warning: Color::Rgb(0xd8, 0xa6, 0x57),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
        }
    }
}

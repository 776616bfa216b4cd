use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Card faces
    pub card_back: Color,
    pub card_front: Color,
    pub overlay: Color,

    // Semantic colors
    pub focused: Color,
    pub drawn: Color,
    pub link: Color,
    pub video: Color,
    pub error: Color,
    pub success: Color,
    pub info: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            card_back: Color::Rgb(0x45, 0x40, 0x3d),
            card_front: Color::Rgb(0x32, 0x30, 0x2f),
            overlay: Color::Rgb(0x1d, 0x20, 0x21),
            focused: Color::Rgb(0xd8, 0xa6, 0x57),
            drawn: Color::Rgb(0xa9, 0xb6, 0x65),
            link: Color::Rgb(0x7d, 0xae, 0xa3),
            video: Color::Rgb(0xd3, 0x86, 0x9b),
            error: Color::Rgb(0xea, 0x69, 0x62),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}

use ratatui::style::Color;

/// Catppuccin Mocha color palette
pub mod colors {
    use super::Color;

    pub const OVERLAY0: Color = Color::Rgb(108, 112, 134);
    pub const TEXT: Color = Color::Rgb(205, 214, 244);

    // Accent colors
    pub const MAUVE: Color = Color::Rgb(203, 166, 247);
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);
    pub const GREEN: Color = Color::Rgb(166, 227, 161);
}

/// Semantic color aliases for UI elements
pub mod ui {
    use super::Color;
    use super::colors;

    /// Picker title and the item under the cursor
    pub const PRIMARY: Color = colors::MAUVE;

    /// Checked items in multiple selection
    pub const ACTIVE: Color = colors::GREEN;

    /// Filter query and key hints
    pub const HIGHLIGHT: Color = colors::YELLOW;

    /// Muted/secondary text
    pub const MUTED: Color = colors::OVERLAY0;

    /// Normal text color
    pub const TEXT: Color = colors::TEXT;
}

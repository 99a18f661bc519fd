use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x008257e5);
pub const SECONDARY: Color = Color::from_u32(0x0004d361);
pub const NEUTRAL: Color = Color::from_u32(0x00494d4b);
pub const BACKGROUND: Color = Color::from_u32(0x000d0d0d);

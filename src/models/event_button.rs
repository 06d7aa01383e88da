use serde::Serialize;

/// Colours offered for new buttons, cycled by button count.
pub const PALETTE: [u32; 8] = [
    0xFFE53935, // red
    0xFFFB8C00, // orange
    0xFF43A047, // green
    0xFF1E88E5, // blue
    0xFF8E24AA, // purple
    0xFF00ACC1, // cyan
    0xFF6D4C41, // brown
    0xFF546E7A, // blue grey
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventButton {
    pub id: i64,      // ⇔ event_buttons.id (0 = not stored yet)
    pub code: i32,    // ⇔ event_buttons.code (unique by convention only)
    pub name: String, // ⇔ event_buttons.name
    pub color: u32,   // ⇔ event_buttons.color (ARGB)
}

impl EventButton {
    /// Button that has not been stored yet (`id = 0`).
    pub fn new(code: i32, name: &str, color: u32) -> Self {
        Self {
            id: 0,
            code,
            name: name.to_string(),
            color,
        }
    }

    /// Colour as `#AARRGGBB`.
    pub fn color_hex(&self) -> String {
        format_color(self.color)
    }

    /// Truecolor ANSI swatch used by the CLI tables.
    pub fn swatch(&self) -> String {
        let r = (self.color >> 16) & 0xFF;
        let g = (self.color >> 8) & 0xFF;
        let b = self.color & 0xFF;
        format!("\x1b[48;2;{r};{g};{b}m  \x1b[0m")
    }
}

/// The set seeded into an empty button table: codes 1–6.
pub fn default_buttons() -> Vec<EventButton> {
    PALETTE[..6]
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let code = i as i32 + 1;
            EventButton::new(code, &format!("Event {code}"), *color)
        })
        .collect()
}

/// Palette colour proposed for the next button.
pub fn next_palette_color(existing: usize) -> u32 {
    PALETTE[existing % PALETTE.len()]
}

pub fn format_color(color: u32) -> String {
    format!("#{color:08X}")
}

/// Parse `#RRGGBB`, `#AARRGGBB`, `0xAARRGGBB` or bare hex.
/// Six-digit values get a fully opaque alpha channel.
pub fn parse_color(input: &str) -> Option<u32> {
    let s = input.trim();
    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    let value = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        6 => Some(0xFF00_0000 | value),
        8 => Some(value),
        _ => None,
    }
}

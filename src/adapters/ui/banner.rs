//! Warm ASCII banner with gradient (QR-MENU).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Accent amber (#c58e48), the default menu theme color.
const AMBER: (u8, u8, u8) = (0xc5, 0x8e, 0x48);
/// Warm cream (#f2e5d0).
const CREAM: (u8, u8, u8) = (0xf2, 0xe5, 0xd0);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "QR-MENU" in FIGlet ASCII with a gradient from
/// amber to cream, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let font = FIGfont::standard().expect("figlet standard font");
    let figure = font.convert("QR-MENU").expect("figlet convert QR-MENU");
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(AMBER, CREAM, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: AMBER.0,
        g: AMBER.1,
        b: AMBER.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("Browse. Add. Order on WhatsApp.\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

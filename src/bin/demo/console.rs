//! Text dump of a window's visible pixels.

use std::fmt::Write as _;

use tilewin::Window;

/// One character per palette index.
const PALETTE: [char; 16] = [
    ' ', '.', '#', '+', 'o', 'o', 'o', 'o', 'o', 'o', 'o', 'o', 'o', 'o', 'o', '%',
];

pub fn render<const BYTES: usize>(window: &Window<BYTES>) -> String {
    let mut out = String::with_capacity((window.width() as usize + 3) * window.height() as usize);
    for y in 0..window.height() {
        out.push('|');
        out.extend(window.vram_row(y).map(|color| PALETTE[color as usize & 0x0F]));
        let _ = writeln!(out, "|");
    }
    out
}

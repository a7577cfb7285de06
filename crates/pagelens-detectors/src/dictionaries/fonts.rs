/// OS-provided and CSS generic font-stack tokens, lowercase
pub const SYSTEM_FONT_TOKENS: &[&str] = &[
    // CSS generic families
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
    "fangsong",
    // Platform UI fonts
    "-apple-system",
    "blinkmacsystemfont",
    "segoe ui",
    "roboto",
    "oxygen",
    "oxygen-sans",
    "ubuntu",
    "cantarell",
    "fira sans",
    "droid sans",
    "helvetica neue",
    "noto sans",
    "liberation sans",
    "sf pro text",
    "sf pro display",
    "sf mono",
    // Web-safe families
    "arial",
    "helvetica",
    "georgia",
    "times",
    "times new roman",
    "courier",
    "courier new",
    "verdana",
    "tahoma",
    "trebuchet ms",
    "lucida grande",
    "lucida console",
    "menlo",
    "monaco",
    "consolas",
    // Emoji fallbacks
    "apple color emoji",
    "segoe ui emoji",
    "segoe ui symbol",
    "noto color emoji",
    // Keywords that are not families at all
    "inherit",
    "initial",
    "unset",
    "revert",
];

pub fn is_system_token(token: &str) -> bool {
    SYSTEM_FONT_TOKENS.contains(&token)
}

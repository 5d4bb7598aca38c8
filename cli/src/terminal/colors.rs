use colored::Color;

pub const PRIMARY: Color = Color::TrueColor {
    r: 0x7a,
    g: 0xc7,
    b: 0xff,
};
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor {
    r: 0xd0,
    g: 0xd0,
    b: 0xd0,
};
pub const IPV4_ADDR: Color = Color::TrueColor {
    r: 0x9e,
    g: 0xe4,
    b: 0x93,
};

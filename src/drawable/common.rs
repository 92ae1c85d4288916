/// Side of the square box a sticker glyph is centered in, in logical units
pub const STICKER_SIZE: f32 = 32.0;

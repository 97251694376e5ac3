//! Key codes as reported by `KeyboardEvent.keyCode`.

pub const K_A: u32 = 65;
pub const K_B: u32 = 66;
pub const K_C: u32 = 67;
pub const K_D: u32 = 68;
pub const K_E: u32 = 69;
pub const K_F: u32 = 70;
pub const K_G: u32 = 71;
pub const K_H: u32 = 72;
pub const K_I: u32 = 73;
pub const K_J: u32 = 74;
pub const K_K: u32 = 75;
pub const K_L: u32 = 76;
pub const K_M: u32 = 77;
pub const K_N: u32 = 78;
pub const K_O: u32 = 79;
pub const K_P: u32 = 80;
pub const K_Q: u32 = 81;
pub const K_R: u32 = 82;
pub const K_S: u32 = 83;
pub const K_T: u32 = 84;
pub const K_U: u32 = 85;
pub const K_V: u32 = 86;
pub const K_W: u32 = 87;
pub const K_X: u32 = 88;
pub const K_Y: u32 = 89;
pub const K_Z: u32 = 90;

pub const K_LEFT: u32 = 37;
pub const K_UP: u32 = 38;
pub const K_RIGHT: u32 = 39;
pub const K_DOWN: u32 = 40;
pub const K_SPACE: u32 = 32;
pub const K_ESC: u32 = 27;
pub const K_PGUP: u32 = 33;
pub const K_PGDOWN: u32 = 34;
pub const K_END: u32 = 35;
pub const K_HOME: u32 = 36;

pub const K_0: u32 = 48;
pub const K_1: u32 = 49;
pub const K_2: u32 = 50;
pub const K_3: u32 = 51;
pub const K_4: u32 = 52;
pub const K_5: u32 = 53;
pub const K_6: u32 = 54;
pub const K_7: u32 = 55;
pub const K_8: u32 = 56;
pub const K_9: u32 = 57;

/// Size of the key table; codes at or above this are ignored.
pub const KEY_COUNT: usize = 256;

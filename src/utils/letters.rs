use std::collections::HashMap;
use once_cell::sync::Lazy;

/// The 26 letters tiles are drawn from, uniformly
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Fixed point value of each letter
pub static LETTER_VALUES: Lazy<HashMap<char, u32>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // 1 point letters
    for ch in ['A', 'E', 'I', 'L', 'N', 'O', 'R', 'S', 'T', 'U'] {
        map.insert(ch, 1);
    }

    // 2 points
    for ch in ['D', 'G'] {
        map.insert(ch, 2);
    }

    // 3 points
    for ch in ['B', 'C', 'M', 'P'] {
        map.insert(ch, 3);
    }

    // 4 points
    for ch in ['F', 'H', 'V', 'W', 'Y'] {
        map.insert(ch, 4);
    }

    // 5 points
    map.insert('K', 5);

    // 8 points
    for ch in ['J', 'X'] {
        map.insert(ch, 8);
    }

    // 10 points
    for ch in ['Q', 'Z'] {
        map.insert(ch, 10);
    }

    map
});

/// Get the point value for a letter, or `None` outside A-Z
pub fn letter_value(letter: char) -> Option<u32> {
    LETTER_VALUES.get(&letter.to_ascii_uppercase()).copied()
}

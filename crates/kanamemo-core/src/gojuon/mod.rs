//! Gojuon Tables
//!
//! The fixed 46-symbol kana alphabet: glyph metadata per key and the row
//! grouping used as recommendation candidate groups. Static, read-only data;
//! the progress engine never mutates it.

/// Display metadata for one kana symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KanaGlyph {
    /// Stable romaji key, unique per symbol.
    pub key: &'static str,
    pub hiragana: &'static str,
    pub katakana: &'static str,
    pub romaji: &'static str,
}

macro_rules! glyph {
    ($key:literal, $hira:literal, $kata:literal) => {
        KanaGlyph {
            key: $key,
            hiragana: $hira,
            katakana: $kata,
            romaji: $key,
        }
    };
}

/// All 46 gojuon symbols in table order.
pub const GOJUON_DATA: &[KanaGlyph] = &[
    // あ行
    glyph!("a", "あ", "ア"),
    glyph!("i", "い", "イ"),
    glyph!("u", "う", "ウ"),
    glyph!("e", "え", "エ"),
    glyph!("o", "お", "オ"),
    // か行
    glyph!("ka", "か", "カ"),
    glyph!("ki", "き", "キ"),
    glyph!("ku", "く", "ク"),
    glyph!("ke", "け", "ケ"),
    glyph!("ko", "こ", "コ"),
    // さ行
    glyph!("sa", "さ", "サ"),
    glyph!("si", "し", "シ"),
    glyph!("su", "す", "ス"),
    glyph!("se", "せ", "セ"),
    glyph!("so", "そ", "ソ"),
    // た行
    glyph!("ta", "た", "タ"),
    glyph!("ti", "ち", "チ"),
    glyph!("tu", "つ", "ツ"),
    glyph!("te", "て", "テ"),
    glyph!("to", "と", "ト"),
    // な行
    glyph!("na", "な", "ナ"),
    glyph!("ni", "に", "ニ"),
    glyph!("nu", "ぬ", "ヌ"),
    glyph!("ne", "ね", "ネ"),
    glyph!("no", "の", "ノ"),
    // は行
    glyph!("ha", "は", "ハ"),
    glyph!("hi", "ひ", "ヒ"),
    glyph!("fu", "ふ", "フ"),
    glyph!("he", "へ", "ヘ"),
    glyph!("ho", "ほ", "ホ"),
    // ま行
    glyph!("ma", "ま", "マ"),
    glyph!("mi", "み", "ミ"),
    glyph!("mu", "む", "ム"),
    glyph!("me", "め", "メ"),
    glyph!("mo", "も", "モ"),
    // や行
    glyph!("ya", "や", "ヤ"),
    glyph!("yu", "ゆ", "ユ"),
    glyph!("yo", "よ", "ヨ"),
    // ら行
    glyph!("ra", "ら", "ラ"),
    glyph!("ri", "り", "リ"),
    glyph!("ru", "る", "ル"),
    glyph!("re", "れ", "レ"),
    glyph!("ro", "ろ", "ロ"),
    // わ行
    glyph!("wa", "わ", "ワ"),
    glyph!("wo", "を", "ヲ"),
    glyph!("n", "ん", "ン"),
];

/// Row name -> ordered member keys.
pub const GOJUON_ROWS: &[(&str, &[&str])] = &[
    ("あ行", &["a", "i", "u", "e", "o"]),
    ("か行", &["ka", "ki", "ku", "ke", "ko"]),
    ("さ行", &["sa", "si", "su", "se", "so"]),
    ("た行", &["ta", "ti", "tu", "te", "to"]),
    ("な行", &["na", "ni", "nu", "ne", "no"]),
    ("は行", &["ha", "hi", "fu", "he", "ho"]),
    ("ま行", &["ma", "mi", "mu", "me", "mo"]),
    ("や行", &["ya", "yu", "yo"]),
    ("ら行", &["ra", "ri", "ru", "re", "ro"]),
    ("わ行", &["wa", "wo", "n"]),
];

/// Look up the glyph metadata for a kana key.
pub fn glyph(key: &str) -> Option<&'static KanaGlyph> {
    GOJUON_DATA.iter().find(|g| g.key == key)
}

/// Ordered member keys of one row, if the row exists.
pub fn row_members(row: &str) -> Option<&'static [&'static str]> {
    GOJUON_ROWS
        .iter()
        .find(|(name, _)| *name == row)
        .map(|(_, members)| *members)
}

/// All row names in table order.
pub fn rows() -> impl Iterator<Item = &'static str> {
    GOJUON_ROWS.iter().map(|(name, _)| *name)
}

/// All kana keys in table order.
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    GOJUON_DATA.iter().map(|g| g.key)
}

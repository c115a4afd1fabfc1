//! Kanji numeral rendering for notice numbers
//!
//! Notice numbers show up in the index spreadsheet either as arabic digits,
//! as formal kanji numerals (百二十三) or as a digit-by-digit kanji
//! transliteration (一二三). This module produces the two kanji forms.

/// Single-character glyphs for the decimal digits 0-9
pub const DIGIT_GLYPHS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Place markers inside a four-digit group, highest first
const GROUP_MARKERS: [(u64, char); 3] = [(1000, '千'), (100, '百'), (10, '十')];

/// Myriad units between four-digit groups (enough for the whole u64 range)
const MYRIAD_UNITS: [&str; 5] = ["", "万", "億", "兆", "京"];

/// Render `number` as a formal kanji numeral.
///
/// `123` becomes `百二十三`, `10` becomes `十`, `10000` becomes `一万`
/// and `0` becomes `〇`.
pub fn to_formal_kanji(number: u64) -> String {
    if number == 0 {
        return DIGIT_GLYPHS[0].to_string();
    }

    let mut groups = Vec::with_capacity(MYRIAD_UNITS.len());
    let mut rest = number;
    while rest > 0 {
        groups.push(rest % 10_000);
        rest /= 10_000;
    }

    let mut rendered = String::new();
    for (unit, group) in groups.iter().enumerate().rev() {
        if *group == 0 {
            continue;
        }
        rendered.push_str(&render_group(*group));
        rendered.push_str(MYRIAD_UNITS[unit]);
    }
    rendered
}

/// Render `number` by replacing each decimal digit with its kanji glyph.
///
/// `123` becomes `一二三` and `105` becomes `一〇五`.
pub fn to_digit_kanji(number: u64) -> String {
    number
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| DIGIT_GLYPHS[d as usize])
        .collect()
}

// A leading 一 is dropped before 十/百/千 but a bare group of 1 stays 一.
fn render_group(group: u64) -> String {
    let mut rendered = String::new();
    let mut rest = group;

    for (value, marker) in GROUP_MARKERS {
        let digit = rest / value;
        rest %= value;
        match digit {
            0 => {}
            1 => rendered.push(marker),
            d => {
                rendered.push(DIGIT_GLYPHS[d as usize]);
                rendered.push(marker);
            }
        }
    }

    if rest > 0 {
        rendered.push(DIGIT_GLYPHS[rest as usize]);
    }
    rendered
}

//! Script-based language detection for transcripts

use nyaya_common::models::Language;

fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

fn is_telugu(c: char) -> bool {
    ('\u{0C00}'..='\u{0C7F}').contains(&c)
}

/// Guess the language of a transcript from the script it is written in.
///
/// Devanagari maps to Hindi and Telugu script to Telugu; the script with more
/// characters wins. Latin text and anything else map to English.
pub fn detect_language(text: &str) -> Language {
    let (devanagari, telugu) = text.chars().fold((0usize, 0usize), |(d, t), c| {
        if is_devanagari(c) {
            (d + 1, t)
        } else if is_telugu(c) {
            (d, t + 1)
        } else {
            (d, t)
        }
    });

    if devanagari == 0 && telugu == 0 {
        Language::En
    } else if telugu > devanagari {
        Language::Te
    } else {
        Language::Hi
    }
}

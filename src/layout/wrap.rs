// src/layout/wrap.rs

//! Greedy word wrapping for node labels.
//!
//! Widths are counted in `char`s. Words longer than the width are cut into
//! width-sized chunks before wrapping, so no line ever exceeds the width.

/// Split one whitespace-free token into chunks of at most `width` chars.
fn split_long_word(word: &str, width: usize) -> Vec<String> {
    if word.chars().count() <= width {
        return vec![word.to_string()];
    }

    let chars: Vec<char> = word.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

/// Wrap `text` to lines of at most `width` chars.
///
/// Blank text yields a single empty line so a node always has a title row.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let words: Vec<String> = text
        .split_whitespace()
        .flat_map(|w| split_long_word(w, width))
        .collect();

    if words.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in words {
        let word_len = word.chars().count();
        if current.is_empty() {
            current = word;
            current_len = word_len;
            continue;
        }

        if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(&word);
            current_len += 1 + word_len;
            continue;
        }

        lines.push(std::mem::take(&mut current));
        current = word;
        current_len = word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap an ingredient list joined with `", "`. No ingredients, no lines.
pub fn wrap_ingredients(ingredients: &[String], width: usize) -> Vec<String> {
    let text = ingredients.join(", ");
    if text.is_empty() {
        return Vec::new();
    }
    wrap_text(&text, width)
}

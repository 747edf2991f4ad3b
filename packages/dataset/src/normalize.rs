//! Region name normalization.
//!
//! Both datasets spell names in inconsistent case (`"NORTH GOA"`,
//! `"North goa"`). Names are converted to title case on load so the two
//! tables join on plain string equality.

/// Converts `name` to title case: the first letter of every run of
/// letters is upper-cased and the rest lower-cased. Surrounding and
/// repeated inner whitespace is collapsed.
#[must_use]
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_letter = false;

    for (i, word) in name.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
            prev_is_letter = false;
        }
        for ch in word.chars() {
            if ch.is_alphabetic() {
                if prev_is_letter {
                    out.extend(ch.to_lowercase());
                } else {
                    out.extend(ch.to_uppercase());
                }
                prev_is_letter = true;
            } else {
                out.push(ch);
                prev_is_letter = false;
            }
        }
    }

    out
}

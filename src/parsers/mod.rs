pub mod links;
pub mod price_table;

pub use links::*;
pub use price_table::*;

use html_escape::decode_html_entities;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace_and_entities() {
        assert_eq!(clean_text("  $1,200.00 \n\t"), "$1,200.00");
        assert_eq!(clean_text("BGS&nbsp;10   Black"), "BGS 10 Black");
        assert_eq!(clean_text("Pok&eacute;mon"), "Pokémon");
    }
}

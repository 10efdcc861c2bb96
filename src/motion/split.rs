use thiserror::Error;

/// Unit of text that animates on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    #[default]
    Chars,
    Words,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    #[error("nothing to animate in {0:?}")]
    Blank(String),
}

/// One word of split text. Each piece carries its index in the stagger order.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitWord {
    pub pieces: Vec<(String, usize)>,
}

/// Text broken into words, and in [`SplitMode::Chars`] further into
/// characters. Words stay whole so lines only wrap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitText {
    words: Vec<SplitWord>,
    len: usize,
}

impl SplitText {
    pub fn new(text: &str, mode: SplitMode) -> Result<Self, SplitError> {
        let mut words = Vec::new();
        let mut next = 0;
        for word in text.split_whitespace() {
            let units: Vec<String> = match mode {
                SplitMode::Words => vec![word.to_string()],
                SplitMode::Chars => word.chars().map(String::from).collect(),
            };
            let mut pieces = Vec::with_capacity(units.len());
            for unit in units {
                pieces.push((unit, next));
                next += 1;
            }
            words.push(SplitWord { pieces });
        }
        if words.is_empty() {
            return Err(SplitError::Blank(text.to_string()));
        }
        Ok(Self { words, len: next })
    }

    pub fn words(&self) -> &[SplitWord] {
        &self.words
    }

    /// Number of animated pieces.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(split: &SplitText) -> Vec<Vec<(&str, usize)>> {
        split
            .words()
            .iter()
            .map(|w| w.pieces.iter().map(|(p, i)| (p.as_str(), *i)).collect())
            .collect()
    }

    #[test]
    fn test_chars_are_numbered_across_words() {
        let split = SplitText::new("Hi  you", SplitMode::Chars).unwrap();
        assert_eq!(
            pieces(&split),
            vec![vec![("H", 0), ("i", 1)], vec![("y", 2), ("o", 3), ("u", 4)]]
        );
        assert_eq!(split.len(), 5);
    }

    #[test]
    fn test_word_mode_keeps_words_whole() {
        let split = SplitText::new("What I Do Best", SplitMode::Words).unwrap();
        assert_eq!(split.len(), 4);
        assert_eq!(split.words()[3].pieces, vec![("Best".to_string(), 3)]);
    }

    #[test]
    fn test_multibyte_chars_split_cleanly() {
        let split = SplitText::new("café & co", SplitMode::Chars).unwrap();
        assert_eq!(split.words()[0].pieces[3].0, "é");
        assert_eq!(split.len(), 7);
    }

    #[test]
    fn test_blank_text_is_an_error() {
        assert_eq!(
            SplitText::new("  \n ", SplitMode::Words),
            Err(SplitError::Blank("  \n ".to_string()))
        );
        assert!(SplitText::new("", SplitMode::Chars).is_err());
    }
}

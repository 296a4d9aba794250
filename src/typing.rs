/// Glyph drawn in place of a key pressed where the passage expects a space
pub const SPACE_MISMATCH_GLYPH: char = '_';

/// A key as seen by the input capture layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
    Other,
}

/// One recorded keystroke, index-aligned with the passage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypedEntry {
    pub char: char,
    pub correct: bool,
    pub is_space_mismatch: bool,
}

impl TypedEntry {
    /// Judge `input` against the passage character it lands on
    pub fn judge(expected: char, input: char) -> Self {
        if expected == ' ' && input != ' ' {
            return Self {
                char: input,
                correct: false,
                is_space_mismatch: true,
            };
        }

        Self {
            char: input,
            correct: input == expected,
            is_space_mismatch: false,
        }
    }

    /// The character to display at this position
    pub fn display_char(&self, expected: char) -> char {
        if self.is_space_mismatch {
            SPACE_MISMATCH_GLYPH
        } else {
            expected
        }
    }
}

/// Keystroke record for a single passage
#[derive(Clone, Debug, Default)]
pub struct TypingBuffer {
    passage: Vec<char>,
    entries: Vec<TypedEntry>,
}

impl TypingBuffer {
    pub fn new(passage: &str) -> Self {
        Self {
            passage: passage.chars().collect(),
            entries: Vec::new(),
        }
    }

    pub fn passage(&self) -> &[char] {
        &self.passage
    }

    pub fn passage_len(&self) -> usize {
        self.passage.len()
    }

    pub fn entries(&self) -> &[TypedEntry] {
        &self.entries
    }

    pub fn typed_len(&self) -> usize {
        self.entries.len()
    }

    pub fn correct_count(&self) -> usize {
        self.entries.iter().filter(|e| e.correct).count()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.len() >= self.passage.len()
    }

    pub fn get_expected_char(&self, idx: usize) -> Option<char> {
        self.passage.get(idx).copied()
    }

    /// Index of the character awaiting input, `None` once complete
    pub fn cursor(&self) -> Option<usize> {
        (!self.is_complete()).then_some(self.entries.len())
    }

    /// Record a printable key. Returns false when the passage is already full.
    pub fn write(&mut self, c: char) -> bool {
        match self.get_expected_char(self.entries.len()) {
            Some(expected) => {
                self.entries.push(TypedEntry::judge(expected, c));
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self) {
        self.entries.pop();
    }

    /// Apply a keystroke; returns true if the record changed
    pub fn apply(&mut self, key: Keystroke) -> bool {
        match key {
            Keystroke::Char(c) => self.write(c),
            Keystroke::Backspace => {
                let had_entries = !self.entries.is_empty();
                self.backspace();
                had_entries
            }
            Keystroke::Other => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn completion_percentage(&self) -> f64 {
        completion_percentage(self.entries.len(), self.passage.len())
    }

    pub fn word_count(&self) -> usize {
        let typed: String = self.entries.iter().map(|e| e.char).collect();
        word_count(&typed)
    }
}

pub fn completion_percentage(typed_len: usize, passage_len: usize) -> f64 {
    if passage_len > 0 {
        (typed_len as f64 / passage_len as f64) * 100.0
    } else {
        0.0
    }
}

/// Index of the last lit progress dot; -1 when none is lit
pub fn active_progress_dot(percentage: f64, total_dots: usize) -> i64 {
    ((percentage / 100.0) * total_dots as f64).ceil() as i64 - 1
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_correct_and_incorrect() {
        let ok = TypedEntry::judge('a', 'a');
        assert!(ok.correct);
        assert!(!ok.is_space_mismatch);

        let bad = TypedEntry::judge('a', 'b');
        assert!(!bad.correct);
        assert!(!bad.is_space_mismatch);
        assert_eq!(bad.char, 'b');
    }

    #[test]
    fn test_judge_space_mismatch() {
        for c in ['x', '.', 'A', '_'] {
            let entry = TypedEntry::judge(' ', c);
            assert!(!entry.correct);
            assert!(entry.is_space_mismatch);
            assert_eq!(entry.display_char(' '), SPACE_MISMATCH_GLYPH);
        }

        let space = TypedEntry::judge(' ', ' ');
        assert!(space.correct);
        assert!(!space.is_space_mismatch);
    }

    #[test]
    fn test_space_typed_over_letter_is_plain_error() {
        let entry = TypedEntry::judge('a', ' ');
        assert!(!entry.correct);
        assert!(!entry.is_space_mismatch);
        assert_eq!(entry.display_char('a'), 'a');
    }

    #[test]
    fn test_write_and_backspace() {
        let mut buffer = TypingBuffer::new("test");

        assert!(buffer.write('t'));
        assert!(buffer.write('x'));
        assert_eq!(buffer.typed_len(), 2);
        assert_eq!(buffer.correct_count(), 1);
        assert_eq!(buffer.cursor(), Some(2));

        buffer.backspace();
        assert_eq!(buffer.typed_len(), 1);
        assert_eq!(buffer.cursor(), Some(1));
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut buffer = TypingBuffer::new("test");

        buffer.backspace();
        assert_eq!(buffer.typed_len(), 0);
        assert!(!buffer.apply(Keystroke::Backspace));
        assert_eq!(buffer.typed_len(), 0);
    }

    #[test]
    fn test_write_past_end_is_ignored() {
        let mut buffer = TypingBuffer::new("hi");

        buffer.write('h');
        buffer.write('i');
        assert!(buffer.is_complete());
        assert_eq!(buffer.cursor(), None);

        assert!(!buffer.write('!'));
        assert_eq!(buffer.typed_len(), 2);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut buffer = TypingBuffer::new("hi");
        assert!(!buffer.apply(Keystroke::Other));
        assert_eq!(buffer.typed_len(), 0);
    }

    #[test]
    fn test_completion_percentage() {
        assert_eq!(completion_percentage(0, 0), 0.0);
        assert_eq!(completion_percentage(1, 4), 25.0);
        assert_eq!(completion_percentage(4, 4), 100.0);
    }

    #[test]
    fn test_active_progress_dot() {
        assert_eq!(active_progress_dot(0.0, 7), -1);
        assert_eq!(active_progress_dot(1.0, 7), 0);
        assert_eq!(active_progress_dot(50.0, 7), 3);
        assert_eq!(active_progress_dot(100.0, 7), 6);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count(" the quick  brown "), 3);

        let mut buffer = TypingBuffer::new("go on");
        for c in "go o".chars() {
            buffer.write(c);
        }
        assert_eq!(buffer.word_count(), 2);
    }
}

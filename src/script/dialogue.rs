//! Dialogue parsing for generated podcast scripts.
//!
//! The parser is a two-state machine. It starts `Idle`; a line opening with a
//! recognised speaker prefix moves it to `Speaking(tag)` and emits the text
//! after the first colon. Untagged lines are emitted under the active speaker,
//! or dropped while `Idle`.

/// Speaker tag for the first host.
pub const HOST1: &str = "HOST1";
/// Speaker tag for the second host.
pub const HOST2: &str = "HOST2";

/// Line prefixes that open a new speaker turn, with the tag they map to.
const SPEAKER_PREFIXES: &[(&str, &str)] = &[
    ("HOST1:", HOST1),
    ("HOST 1:", HOST1),
    ("HOST2:", HOST2),
    ("HOST 2:", HOST2),
];

/// One spoken line, in playback order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    /// Speaker tag, e.g. `HOST1`.
    pub speaker: String,
    /// What the speaker says.
    pub text: String,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Idle,
    Speaking(&'static str),
}

impl ParserState {
    /// Consume one script line, returning the next state and the entry to emit.
    fn step(self, line: &str) -> (ParserState, Option<DialogueLine>) {
        if let Some(tag) = speaker_prefix(line) {
            // Prefixes always contain a colon
            let content = line.split_once(':').map(|(_, rest)| rest).unwrap_or_default();
            return (
                ParserState::Speaking(tag),
                Some(DialogueLine::new(tag, content.trim())),
            );
        }

        match self {
            ParserState::Idle => (self, None),
            ParserState::Speaking(tag) => (self, Some(DialogueLine::new(tag, line.trim()))),
        }
    }
}

/// Find the speaker tag whose prefix opens `line`.
fn speaker_prefix(line: &str) -> Option<&'static str> {
    SPEAKER_PREFIXES
        .iter()
        .find(|(prefix, _)| line.starts_with(prefix))
        .map(|(_, tag)| *tag)
}

/// Split a script into dialogue lines.
///
/// Never fails: malformed input degrades by omission.
pub fn parse_dialogue(script: &str) -> Vec<DialogueLine> {
    let mut state = ParserState::Idle;
    let mut dialogue = Vec::new();

    for line in script.split('\n') {
        let (next, entry) = state.step(line);
        state = next;
        dialogue.extend(entry);
    }

    dialogue
}

/// Count lines that open with a recognised speaker prefix.
pub fn count_tagged_lines(script: &str) -> usize {
    script
        .split('\n')
        .filter(|line| speaker_prefix(line).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(dialogue: &[DialogueLine]) -> Vec<(&str, &str)> {
        dialogue
            .iter()
            .map(|d| (d.speaker.as_str(), d.text.as_str()))
            .collect()
    }

    #[test]
    fn test_alternating_hosts() {
        let dialogue = parse_dialogue("HOST1: hello\nHOST2: hi there\nHOST1: bye");
        assert_eq!(
            pairs(&dialogue),
            vec![("HOST1", "hello"), ("HOST2", "hi there"), ("HOST1", "bye")]
        );
    }

    #[test]
    fn test_untagged_lines_before_first_speaker_are_dropped() {
        let dialogue = parse_dialogue("Welcome to the show\n\nHOST2: thanks");
        assert_eq!(pairs(&dialogue), vec![("HOST2", "thanks")]);
    }

    #[test]
    fn test_continuation_line_keeps_speaker() {
        let dialogue = parse_dialogue("HOST1: hello\nstill talking");
        assert_eq!(
            pairs(&dialogue),
            vec![("HOST1", "hello"), ("HOST1", "still talking")]
        );
    }

    #[test]
    fn test_spaced_prefixes() {
        let dialogue = parse_dialogue("HOST 1: one\nHOST 2:two ");
        assert_eq!(pairs(&dialogue), vec![("HOST1", "one"), ("HOST2", "two")]);
    }

    #[test]
    fn test_only_first_colon_splits() {
        let dialogue = parse_dialogue("HOST1: Ratio: 3:1");
        assert_eq!(pairs(&dialogue), vec![("HOST1", "Ratio: 3:1")]);
    }

    #[test]
    fn test_blank_continuation_is_emitted_empty() {
        let dialogue = parse_dialogue("HOST1: a\n\nHOST2: b");
        assert_eq!(
            pairs(&dialogue),
            vec![("HOST1", "a"), ("HOST1", ""), ("HOST2", "b")]
        );
    }

    #[test]
    fn test_prefix_must_start_line() {
        let dialogue = parse_dialogue("  HOST1: indented\nhost1: lower");
        assert!(dialogue.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let dialogue = parse_dialogue("HOST1: hi\r\nHOST2: yo\r\n");
        assert_eq!(pairs(&dialogue), vec![("HOST1", "hi"), ("HOST2", "yo"), ("HOST2", "")]);
    }

    #[test]
    fn test_count_tagged_lines() {
        assert_eq!(count_tagged_lines("HOST1: a\nmore\nHOST 2: b"), 2);
        assert_eq!(count_tagged_lines("Narrator: nothing here"), 0);
    }
}

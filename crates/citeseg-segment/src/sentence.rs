//! Heuristic sentence boundary detection.
//!
//! A sentence ends at a run of terminal punctuation (plus any closing quotes or
//! brackets right after it). ASCII `.`, `!` and `?` only count when followed by
//! whitespace or the end of the text, which keeps decimals, URLs and dotted
//! identifiers intact. Full-width terminals (`。．！？`) always count, since
//! CJK text does not put spaces between sentences.
//!
//! A lone period after a single capital (`J.`), a capital plus one lowercase
//! letter (`Dr.`, `Mr.`) or a dotted abbreviation (`e.g.`, `U.S.`) is not a
//! boundary.

/// Half-open `(start, end)` character span.
pub type Span = (usize, usize);

const ASCII_TERMINALS: [char; 3] = ['.', '!', '?'];
const WIDE_TERMINALS: [char; 4] = ['。', '．', '！', '？'];
const CLOSERS: [char; 12] = [
    '"', '\'', ')', ']', '}', '”', '’', '」', '』', '）', '】', '》',
];

/// Find sentence spans in `text`, in document order.
///
/// The whitespace run after a boundary is excluded from both neighbours, so
/// spans never overlap. Text after the last boundary forms its own span when it
/// is not blank. Text without any boundary yields one span over the whole
/// input; blank text yields none.
#[must_use]
pub fn find_sentence_boundaries(text: &str) -> Vec<Span> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_terminal(chars[i]) {
            i += 1;
            continue;
        }

        let run_start = i;
        let mut end = i + 1;
        while end < chars.len() && is_terminal(chars[end]) {
            end += 1;
        }
        while end < chars.len() && CLOSERS.contains(&chars[end]) {
            end += 1;
        }

        if !is_boundary(&chars, start, run_start, end) {
            i = end;
            continue;
        }

        push_span(&chars, &mut spans, start, end);

        let mut next = end;
        while next < chars.len() && chars[next].is_whitespace() {
            next += 1;
        }
        start = next;
        i = next;
    }

    push_span(&chars, &mut spans, start, chars.len());
    spans
}

/// Sentence spans of `text` shifted by `base`, i.e. expressed in the
/// coordinates of a larger document that `text` starts at.
#[must_use]
pub fn sentence_offsets_with_base(text: &str, base: usize) -> Vec<Span> {
    find_sentence_boundaries(text)
        .into_iter()
        .map(|(start, end)| (start + base, end + base))
        .collect()
}

fn is_terminal(c: char) -> bool {
    ASCII_TERMINALS.contains(&c) || WIDE_TERMINALS.contains(&c)
}

/// `chars[run_start..end]` is a terminal run with trailing closers;
/// `sentence_start` is where the current sentence began.
fn is_boundary(chars: &[char], sentence_start: usize, run_start: usize, end: usize) -> bool {
    let run = &chars[run_start..end];
    if run.iter().any(|c| WIDE_TERMINALS.contains(c)) {
        return true;
    }
    if end < chars.len() && !chars[end].is_whitespace() {
        return false;
    }

    let terminals = run.iter().take_while(|c| is_terminal(**c)).count();
    if terminals == 1 && run[0] == '.' {
        let word_start = chars[sentence_start..run_start]
            .iter()
            .rposition(|c| c.is_whitespace())
            .map_or(sentence_start, |p| sentence_start + p + 1);
        return !is_abbreviation(&chars[word_start..run_start]);
    }
    true
}

/// `word` is the text between the preceding whitespace and a period.
fn is_abbreviation(word: &[char]) -> bool {
    let lead = word.iter().take_while(|c| !c.is_alphanumeric()).count();
    let word = &word[lead..];
    match word {
        [initial] => initial.is_uppercase(),
        [first, second] => first.is_uppercase() && second.is_lowercase(),
        [.., before, '.', after] => before.is_alphanumeric() && after.is_alphanumeric(),
        _ => false,
    }
}

fn push_span(chars: &[char], spans: &mut Vec<Span>, start: usize, end: usize) {
    if start < end && chars[start..end].iter().any(|c| !c.is_whitespace()) {
        spans.push((start, end));
    }
}

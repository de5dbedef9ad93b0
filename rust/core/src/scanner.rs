// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line Scanner
//!
//! Stateless helpers over a read-only byte buffer. Input ends at the end of
//! the slice or at the first NUL byte, whichever comes first. Both parsing
//! passes walk the buffer through [`Lines`] so that every line is classified
//! the same way twice.

/// Check if byte is a space, tab or carriage return (never a line break)
#[inline(always)]
pub fn is_horizontal_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\r'
}

/// Length of the input up to (not including) the first NUL byte
#[inline]
pub fn effective_len(input: &[u8]) -> usize {
    memchr::memchr(0, input).unwrap_or(input.len())
}

/// Advance past spaces and tabs. Stops at `\n` and at end of input.
#[inline]
pub fn skip_horizontal_whitespace(input: &[u8], mut pos: usize) -> usize {
    while pos < input.len() && is_horizontal_whitespace(input[pos]) {
        pos += 1;
    }
    pos
}

/// Advance to the byte after the next `\n`, or to end of input if the
/// remaining text has no line terminator.
#[inline]
pub fn skip_line(input: &[u8], pos: usize) -> usize {
    if pos >= input.len() {
        return input.len();
    }
    match memchr::memchr(b'\n', &input[pos..]) {
        Some(offset) => pos + offset + 1,
        None => input.len(),
    }
}

/// Exact literal prefix match at `pos`
#[inline]
pub fn starts_with(input: &[u8], pos: usize, prefix: &[u8]) -> bool {
    input.get(pos..).is_some_and(|rest| rest.starts_with(prefix))
}

/// Split a line body into whitespace-delimited tokens
#[inline]
pub fn tokens(body: &[u8]) -> impl Iterator<Item = &[u8]> {
    body.split(|&b| is_horizontal_whitespace(b))
        .filter(|token| !token.is_empty())
}

/// Count the corner tokens of a face line body (the text after `f`).
///
/// A triangle has exactly 3. Trailing whitespace does not add a token.
#[inline]
pub fn count_corner_tokens(body: &[u8]) -> usize {
    tokens(body).count()
}

/// The line classes recognized by both passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `o <name>`
    Object,
    /// `v <x> <y> <z>`
    Location,
    /// `vn <x> <y> <z>`
    Normal,
    /// `vt <u> <v>`
    TexCoord,
    /// `f <a/b/c> <a/b/c> <a/b/c>`
    Face,
    /// `# ...`
    Comment,
    /// Empty or whitespace-only line
    Blank,
    /// Anything else (`g`, `s`, `usemtl`, `vp`, ...), skipped
    Other,
}

impl LineKind {
    /// The keyword that introduces this line class, if it has one.
    pub fn keyword(&self) -> Option<&'static [u8]> {
        match self {
            LineKind::Object => Some(b"o"),
            LineKind::Location => Some(b"v"),
            LineKind::Normal => Some(b"vn"),
            LineKind::TexCoord => Some(b"vt"),
            LineKind::Face => Some(b"f"),
            LineKind::Comment | LineKind::Blank | LineKind::Other => None,
        }
    }
}

/// Keyword at `pos` followed by horizontal whitespace
#[inline]
fn keyword_at(input: &[u8], pos: usize, keyword: &[u8]) -> bool {
    starts_with(input, pos, keyword)
        && input
            .get(pos + keyword.len())
            .is_some_and(|&b| is_horizontal_whitespace(b))
}

/// Classify the line whose first non-whitespace byte is at `pos`.
pub fn classify_line(input: &[u8], pos: usize) -> LineKind {
    match input.get(pos) {
        None | Some(b'\n') => LineKind::Blank,
        Some(b'#') => LineKind::Comment,
        Some(_) => {
            const KINDS: [LineKind; 5] = [
                LineKind::Object,
                LineKind::Normal,
                LineKind::TexCoord,
                LineKind::Location,
                LineKind::Face,
            ];
            KINDS
                .into_iter()
                .find(|kind| kind.keyword().is_some_and(|kw| keyword_at(input, pos, kw)))
                .unwrap_or(LineKind::Other)
        }
    }
}

/// One classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    pub kind: LineKind,
    /// Text after the keyword for keyword lines, otherwise the line with
    /// leading whitespace removed. Never includes the `\n`.
    pub body: &'a [u8],
}

/// Iterator over classified lines
pub struct Lines<'a> {
    input: &'a [u8],
    position: usize,
    number: usize,
}

impl<'a> Lines<'a> {
    /// Create a new line walker. Input is cut at the first NUL byte.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input: &input[..effective_len(input)],
            position: 0,
            number: 0,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.position >= self.input.len() {
            return None;
        }
        self.number += 1;

        let start = skip_horizontal_whitespace(self.input, self.position);
        let next = skip_line(self.input, start);
        let end = if next > start && self.input[next - 1] == b'\n' {
            next - 1
        } else {
            next
        };
        self.position = next;

        let kind = classify_line(self.input, start);
        let body_start = start + kind.keyword().map_or(0, <[u8]>::len);

        Some(Line {
            number: self.number,
            kind,
            body: &self.input[body_start..end],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_horizontal_whitespace() {
        let input = b" \t v 1\n";
        assert_eq!(skip_horizontal_whitespace(input, 0), 3);
        assert_eq!(skip_horizontal_whitespace(input, 3), 3);
        // Never crosses the line break
        let input = b"   \n  x";
        assert_eq!(skip_horizontal_whitespace(input, 0), 3);
        assert_eq!(skip_horizontal_whitespace(b"  ", 0), 2);
    }

    #[test]
    fn test_skip_line() {
        let input = b"v 1 2 3\nvn 0 0 1";
        assert_eq!(skip_line(input, 0), 8);
        // Last line without terminator ends at end of input
        assert_eq!(skip_line(input, 8), input.len());
        assert_eq!(skip_line(input, input.len()), input.len());
        assert_eq!(skip_line(b"\n\n", 0), 1);
    }

    #[test]
    fn test_starts_with() {
        let input = b"vt 0 1";
        assert!(starts_with(input, 0, b"vt"));
        assert!(starts_with(input, 0, b"v"));
        assert!(!starts_with(input, 1, b"vt"));
        assert!(!starts_with(input, 10, b"v"));
    }

    #[test]
    fn test_count_corner_tokens() {
        assert_eq!(count_corner_tokens(b" 1/1/1 2/2/2 3/3/3"), 3);
        assert_eq!(count_corner_tokens(b"\t1//1\t2//2  3//3  \r"), 3);
        assert_eq!(count_corner_tokens(b" 1 2"), 2);
        assert_eq!(count_corner_tokens(b" 1 2 3 4"), 4);
        assert_eq!(count_corner_tokens(b""), 0);
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line(b"o cube", 0), LineKind::Object);
        assert_eq!(classify_line(b"v 1 2 3", 0), LineKind::Location);
        assert_eq!(classify_line(b"vn 0 1 0", 0), LineKind::Normal);
        assert_eq!(classify_line(b"vt\t0 1", 0), LineKind::TexCoord);
        assert_eq!(classify_line(b"f 1 2 3", 0), LineKind::Face);
        assert_eq!(classify_line(b"# comment", 0), LineKind::Comment);
        assert_eq!(classify_line(b"\n", 0), LineKind::Blank);
        assert_eq!(classify_line(b"", 0), LineKind::Blank);
        assert_eq!(classify_line(b"vp 0.5", 0), LineKind::Other);
        assert_eq!(classify_line(b"usemtl red", 0), LineKind::Other);
        assert_eq!(classify_line(b"fo 1 2 3", 0), LineKind::Other);
        assert_eq!(classify_line(b"v\n", 0), LineKind::Other);
    }

    #[test]
    fn test_lines_bodies_and_numbers() {
        let input = b"# header\r\n  v 1 2 3\r\n\nf 1 2 3";
        let lines: Vec<_> = Lines::new(input).collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].kind, LineKind::Comment);
        assert_eq!(lines[1].number, 2);
        assert_eq!(lines[1].kind, LineKind::Location);
        assert_eq!(lines[1].body, b" 1 2 3\r");
        assert_eq!(lines[2].kind, LineKind::Blank);
        assert_eq!(lines[3].kind, LineKind::Face);
        assert_eq!(lines[3].body, b" 1 2 3");
    }

    #[test]
    fn test_lines_stop_at_nul() {
        let input = b"v 1 2 3\n\0v 4 5 6\n";
        let kinds: Vec<_> = Lines::new(input).map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LineKind::Location]);
    }

    #[test]
    fn test_lines_trailing_whitespace_line() {
        let input = b"v 1 2 3\n   ";
        let kinds: Vec<_> = Lines::new(input).map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LineKind::Location, LineKind::Blank]);
        assert_eq!(Lines::new(b"").count(), 0);
    }
}

// ── LIKE pattern matching ──
//
// `%` matches any run of characters (including none), `_` exactly one
// character, and `\` makes the next character literal. Matching is
// case-sensitive and works on chars, not bytes.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Char(char),
    AnyOne,
    AnyRun,
}

/// A LIKE pattern compiled once at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    source: String,
    pieces: Vec<Piece>,
}

impl LikePattern {
    pub fn compile(source: &str) -> Self {
        let mut pieces = Vec::with_capacity(source.len());
        let mut chars = source.chars();
        while let Some(c) = chars.next() {
            let piece = match c {
                '%' => {
                    // consecutive runs collapse into one
                    if pieces.last() == Some(&Piece::AnyRun) {
                        continue;
                    }
                    Piece::AnyRun
                }
                '_' => Piece::AnyOne,
                // a trailing backslash stands for itself
                '\\' => Piece::Char(chars.next().unwrap_or('\\')),
                other => Piece::Char(other),
            };
            pieces.push(piece);
        }
        Self {
            source: source.to_owned(),
            pieces,
        }
    }

    /// Greedy wildcard match with single-point backtracking to the last `%`.
    pub fn matches(&self, text: &str) -> bool {
        let text: Vec<char> = text.chars().collect();
        let (mut p, mut t) = (0, 0);
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match self.pieces.get(p) {
                Some(Piece::AnyRun) => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                Some(Piece::AnyOne) => {
                    p += 1;
                    t += 1;
                }
                Some(Piece::Char(c)) if *c == text[t] => {
                    p += 1;
                    t += 1;
                }
                _ => match backtrack {
                    // let the last `%` swallow one more character
                    Some((star_p, star_t)) => {
                        p = star_p + 1;
                        t = star_t + 1;
                        backtrack = Some((star_p, star_t + 1));
                    }
                    None => return false,
                },
            }
        }

        self.pieces[p.min(self.pieces.len())..]
            .iter()
            .all(|piece| *piece == Piece::AnyRun)
    }
}

impl fmt::Display for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.source.replace('\'', "''"))
    }
}

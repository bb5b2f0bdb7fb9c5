//! Sentence segmentation for "semantic newlines".
//!
//! Manual page guidelines ask for every sentence to start on its own line.
//! The heuristic here breaks after runs of sentence terminators (optionally
//! followed by closing quotes) that are followed by whitespace, unless the
//! text before the break ends in a known abbreviation.

use regex::Regex;
use std::sync::LazyLock;

static RE_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?]+['"]*\s+"#).unwrap());

/// Abbreviations that never end a sentence, adapted from the Unicode CLDR
/// English segmentation suppressions. Matching is an exact, case-sensitive
/// suffix match.
const SUPPRESSIONS: &[&str] = &[
    "L.P.", "Alt.", "Approx.", "E.G.", "O.", "Maj.", "Misc.", "P.O.", "J.D.", "Jam.", "Card.",
    "Dec.", "Sept.", "MR.", "Long.", "Hat.", "G.", "Link.", "DC.", "D.C.", "M.T.", "Hz.", "Mrs.",
    "By.", "Act.", "Var.", "N.V.", "Aug.", "B.", "S.A.", "Up.", "Job.", "Num.", "M.I.T.", "Ok.",
    "Org.", "Ex.", "Cont.", "U.", "Mart.", "Fn.", "Abs.", "Lt.", "OK.", "Z.", "E.", "Kb.", "Est.",
    "A.M.", "L.A.", "Prof.", "U.S.", "Nov.", "Ph.D.", "Mar.", "I.T.", "exec.", "Jan.", "N.Y.",
    "X.", "Md.", "Op.", "vs.", "D.A.", "A.D.", "R.L.", "P.M.", "Or.", "M.R.", "Cap.", "PC.",
    "Feb.", "Exec.", "I.e.", "Sep.", "Gb.", "K.", "U.S.C.", "Mt.", "S.", "A.S.", "C.O.D.",
    "Capt.", "Col.", "In.", "C.F.", "Adj.", "AD.", "I.D.", "Mgr.", "R.T.", "B.V.", "M.", "Conn.",
    "Yr.", "Rev.", "Phys.", "pp.", "Ms.", "To.", "Sgt.", "J.K.", "Nr.", "Jun.", "Fri.", "S.A.R.",
    "Lev.", "Lt.Cdr.", "Def.", "F.", "Do.", "Joe.", "Id.", "Mr.", "Dept.", "Is.", "Pvt.", "Diff.",
    "Hon.B.A.", "Q.", "Mb.", "On.", "Min.", "J.B.", "Ed.", "AB.", "A.", "S.p.A.", "I.", "a.m.",
    "Comm.", "Go.", "VS.", "L.", "All.", "PP.", "P.V.", "T.", "K.R.", "Etc.", "D.", "Adv.",
    "Lib.", "E.g.", "Pro.", "U.S.A.", "S.E.", "AA.", "Rep.", "Sq.", "As.", "LLC.", "LTD.", "i.e.",
    "e.g",
];

/// Split `text` into trimmed sentences, one per output line.
///
/// Pure function of its input: calling it twice yields the same sentences.
pub fn segment(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut pending = String::new();
    let mut start = 0;

    let pieces = RE_TERMINATOR
        .find_iter(text)
        .map(|m| {
            let piece = &text[start..m.end()];
            start = m.end();
            piece
        })
        .collect::<Vec<_>>();

    for piece in pieces.into_iter().chain(std::iter::once(&text[start..])) {
        // An abbreviation swallows the break: keep accumulating.
        if is_abbreviated(piece) {
            pending.push_str(piece);
            continue;
        }
        if !piece.is_empty() {
            pending.push_str(piece);
            sentences.push(std::mem::take(&mut pending));
        }
    }

    if !pending.is_empty() {
        sentences.push(pending);
    }

    sentences.iter().map(|s| s.trim().to_string()).collect()
}

fn is_abbreviated(piece: &str) -> bool {
    let piece = piece.trim_end();
    SUPPRESSIONS.iter().any(|abbr| piece.ends_with(abbr))
}

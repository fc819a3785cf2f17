//! Reader for the parser collaborator's CoNLL-U output.

use nom::{
    branch::alt,
    bytes::complete::take_till,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res},
    multi::separated_list1,
    sequence::tuple,
    IResult,
};

use arbor_protocol::{DepRel, Token, UPos};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowId {
    Word(usize),
    /// Multiword token range (`3-4`).
    Range,
    /// Empty node (`3.1`).
    Empty,
}

fn row_id(input: &str) -> IResult<&str, RowId> {
    alt((
        map(tuple((digit1, char('-'), digit1)), |_| RowId::Range),
        map(tuple((digit1, char('.'), digit1)), |_| RowId::Empty),
        map_res(digit1, |d: &str| d.parse::<usize>().map(RowId::Word)),
    ))(input)
}

fn columns(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('\t'), take_till(|c| c == '\t'))(input)
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |d: &str| d.parse::<usize>())(input)
}

fn blank(field: &str) -> bool {
    field.is_empty() || field == "_"
}

/// Parses one token row. `Ok(None)` for ranges and empty nodes.
fn parse_row(line: &str, expected: usize) -> Result<Option<Token>, String> {
    let (_, fields) = all_consuming(columns)(line).map_err(|_| "unreadable row".to_string())?;
    if fields.len() != 10 {
        return Err(format!("expected 10 columns, found {}", fields.len()));
    }

    let id = match all_consuming(row_id)(fields[0]) {
        Ok((_, RowId::Word(id))) => id,
        Ok(_) => return Ok(None),
        Err(_) => return Err(format!("bad token id {:?}", fields[0])),
    };
    if id != expected + 1 {
        return Err(format!("expected token id {}, found {}", expected + 1, id));
    }
    let index = id - 1;

    let head = match all_consuming(number)(fields[6]) {
        Ok((_, 0)) => index,
        Ok((_, head)) => head - 1,
        Err(_) if blank(fields[6]) => index,
        Err(_) => return Err(format!("bad head {:?}", fields[6])),
    };

    let text = fields[1];
    let lemma = if blank(fields[2]) { text } else { fields[2] };
    let tag = if blank(fields[4]) { "" } else { fields[4] };

    Ok(Some(Token::new(
        index,
        text,
        lemma,
        UPos::parse(fields[3]),
        tag,
        DepRel::parse(fields[7]),
        head,
    )))
}

/// Reads every sentence in a CoNLL-U document. Blank lines separate sentences,
/// `#` lines are comments.
pub fn read_sentences(text: &str) -> Result<Vec<Vec<Token>>, ParseError> {
    let mut sentences = Vec::new();
    let mut current: Vec<Token> = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        let row = parse_row(line, current.len()).map_err(|message| ParseError::Conll {
            line: number + 1,
            message,
        })?;
        if let Some(token) = row {
            current.push(token);
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }

    Ok(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# text = The cat eats fish.
1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tcat\tcat\tNOUN\tNN\t_\t3\tnsubj\t_\t_
3\teats\teat\tVERB\tVBZ\t_\t0\tROOT\t_\t_
4\tfish\tfish\tNOUN\tNN\t_\t3\tdobj\t_\t_
5\t.\t.\tPUNCT\t.\t_\t3\tpunct\t_\t_

1-2\tdon't\t_\t_\t_\t_\t_\t_\t_\t_
1\tdo\tdo\tAUX\tVBP\t_\t3\taux\t_\t_
2\tn't\tnot\tPART\tRB\t_\t3\tneg\t_\t_
3\tgo\tgo\tVERB\tVB\t_\t0\tROOT\t_\t_
";

    #[test]
    fn test_reads_sentences() {
        let sentences = read_sentences(DOC).unwrap();
        assert_eq!(sentences.len(), 2);

        let first = &sentences[0];
        assert_eq!(first.len(), 5);
        assert_eq!(first[2].text, "eats");
        assert!(first[2].is_root());
        assert_eq!(first[1].head, 2);
        assert_eq!(first[3].dep, DepRel::DObj);
        assert_eq!(first[0].pos, UPos::Det);
        assert_eq!(first[2].tag, "VBZ");
    }

    #[test]
    fn test_skips_ranges() {
        let sentences = read_sentences(DOC).unwrap();
        let second = &sentences[1];
        assert_eq!(second.len(), 3);
        assert_eq!(second[1].lemma, "not");
        assert_eq!(second[0].head, 2);
    }

    #[test]
    fn test_reports_bad_rows() {
        let err = read_sentences("1\tHi\thi\tINTJ\n").unwrap_err();
        assert!(matches!(err, ParseError::Conll { line: 1, .. }));

        let err = read_sentences("1\ta\ta\tDET\tDT\t_\t2\tdet\t_\t_\n3\tb\tb\tNOUN\tNN\t_\t0\troot\t_\t_\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Conll { line: 2, .. }));

        let err = read_sentences("1\ta\ta\tDET\tDT\t_\tx\tdet\t_\t_\n").unwrap_err();
        assert!(matches!(err, ParseError::Conll { line: 1, .. }));
    }
}

use regex::Regex;

use crate::delimiters::{tag_pattern, Delimiters};
use crate::error::SyntaxError;


/// Scans template source for tags under the active delimiters.
pub(crate) struct Reader<'a> {
    input: &'a str,
    pattern: Regex,
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str, delimiters: &Delimiters) -> Result<Self, SyntaxError> {
        Ok(Reader {
            input,
            pattern: tag_pattern(delimiters)?,
            pos: 0,
        })
    }

    /// Return the text before the next tag, and the tag itself.
    pub(crate) fn pop_front(&mut self) -> Option<(&'a str, Tag<'a>)> {
        let input = self.input;
        let captures = self.pattern.captures_at(input, self.pos)?;
        let whole = captures.get(0)?;
        let group = |i| captures.get(i).map_or("", |m| m.as_str());
        let text = &input[self.pos..whole.start()];
        let tag = Tag {
            source: whole.as_str(),
            prefix: group(1),
            name: group(2),
            suffix: group(3),
            start: whole.start(),
            end: whole.end(),
        };
        self.pos = whole.end();
        Some((text, tag))
    }

    /// Check whether `tag` is alone on its line.
    ///
    /// Only horizontal whitespace may precede it back to the start of the
    /// line, and only horizontal whitespace may follow it up to a newline
    /// or the end of input.
    pub(crate) fn standalone(&self, tag: &Tag<'a>) -> Option<Standalone<'a>> {
        let before = self.input[..tag.start].trim_end_matches(is_inline_space);
        if !before.is_empty() && !before.ends_with('\n') {
            return None;
        }
        let after = &self.input[tag.end..];
        let rest = after.trim_start_matches(is_inline_space);
        let end = if rest.is_empty() {
            self.input.len()
        } else if rest.starts_with('\n') {
            tag.end + (after.len() - rest.len()) + 1
        } else {
            return None;
        };
        Some(Standalone {
            indent: &self.input[before.len()..tag.start],
            end,
        })
    }

    /// Move past the remainder of a standalone line.
    pub(crate) fn skip_to(&mut self, pos: usize) {
        self.pos = pos.max(self.pos);
    }

    pub(crate) fn set_delimiters(&mut self, delimiters: &Delimiters) -> Result<(), SyntaxError> {
        self.pattern = tag_pattern(delimiters)?;
        Ok(())
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Consume and return everything after the last tag.
    pub(crate) fn rest(&mut self) -> &'a str {
        let rest = &self.input[self.pos..];
        self.pos = self.input.len();
        rest
    }
}


/// A matched tag with its sigils and position in the source.
#[derive(Debug)]
pub(crate) struct Tag<'a> {
    pub(crate) source: &'a str,
    prefix: &'a str,
    name: &'a str,
    suffix: &'a str,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<'a> Tag<'a> {
    pub(crate) fn token(&self) -> Result<Token<'a>, SyntaxError> {
        let token = match (self.prefix, self.suffix) {
            ("=", "=") => Token::Delimiters(
                Delimiters::parse(self.name).ok_or_else(|| SyntaxError::InvalidDelimiters {
                    tag: self.source.to_owned(),
                })?,
            ),
            ("{", "}") | ("&", "") => Token::Value(self.name, false),
            ("", "") => Token::Value(self.name, true),
            (_, suffix) if !suffix.is_empty() => {
                return Err(SyntaxError::MalformedTag { tag: self.source.to_owned() })
            }
            ("!", _) => Token::Comment(self.name),
            (">", _) => Token::Partial(self.name),
            ("#", _) => Token::Section(self.name),
            ("^", _) => Token::InvertedSection(self.name),
            ("/", _) => Token::EndSection(self.name),
            _ => return Err(SyntaxError::UnknownTag { tag: self.source.to_owned() }),
        };
        Ok(token)
    }
}


/// Where a standalone tag's line starts its indent and where the line ends.
#[derive(Debug, PartialEq)]
pub(crate) struct Standalone<'a> {
    pub(crate) indent: &'a str,
    pub(crate) end: usize,
}


#[derive(PartialEq, Debug)]
pub(crate) enum Token<'a> {
    Value(&'a str, bool),
    Section(&'a str),
    InvertedSection(&'a str),
    EndSection(&'a str),
    Partial(&'a str),
    Comment(&'a str),
    Delimiters(Delimiters),
}

impl Token<'_> {
    /// Whether the tag may own its line; comments only do so outside sections.
    pub(crate) fn may_stand_alone(&self, in_section: bool) -> bool {
        match self {
            Token::Value(..) => false,
            Token::Comment(_) => !in_section,
            _ => true,
        }
    }
}


pub(crate) fn is_inline_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_only() {
        let mut reader = Reader::new(" 123456 ", &Delimiters::default()).unwrap();
        assert!(reader.pop_front().is_none());
        assert_eq!(reader.rest(), " 123456 ");
    }

    #[test]
    fn text_before_tags() {
        expect_sequence(
            "a{{x}}b{{#s}}c{{/s}}",
            vec![
                ("a", Ok(Token::Value("x", true))),
                ("b", Ok(Token::Section("s"))),
                ("c", Ok(Token::EndSection("s"))),
            ],
        );
    }

    #[test]
    fn value_with_escape() {
        expect_sequence("{{ v }}", vec![("", Ok(Token::Value("v", true)))]);
    }

    #[test]
    fn value_without_escape() {
        expect_sequence(
            "{{{ v }}}{{& w }}",
            vec![
                ("", Ok(Token::Value("v", false))),
                ("", Ok(Token::Value("w", false))),
            ],
        );
    }

    #[test]
    fn update_delimiters() {
        expect_sequence(
            "{{= +++   --- =}}",
            vec![("", Ok(Token::Delimiters(Delimiters::new("+++", "---"))))],
        );
    }

    #[test]
    fn invalid_delimiters_tag() {
        expect_sequence(
            "{{= | =}}",
            vec![("", Err(SyntaxError::InvalidDelimiters { tag: "{{= | =}}".to_owned() }))],
        );
    }

    #[test]
    fn malformed_suffix() {
        expect_sequence(
            "{{#a}}}",
            vec![("", Err(SyntaxError::MalformedTag { tag: "{{#a}}}".to_owned() }))],
        );
    }

    #[test]
    fn unknown_prefix() {
        expect_sequence(
            "{{{a}}",
            vec![("", Err(SyntaxError::UnknownTag { tag: "{{{a}}".to_owned() }))],
        );
    }

    #[test]
    fn other_sigils() {
        expect_sequence(
            "{{! note }}{{> part }}{{^ inv }}",
            vec![
                ("", Ok(Token::Comment("note"))),
                ("", Ok(Token::Partial("part"))),
                ("", Ok(Token::InvertedSection("inv"))),
            ],
        );
    }

    #[test]
    fn standalone_with_indent() {
        let input = "x\n  {{#a}}  \ny";
        let mut reader = Reader::new(input, &Delimiters::default()).unwrap();
        let (_, tag) = reader.pop_front().unwrap();
        assert_eq!(
            reader.standalone(&tag),
            Some(Standalone { indent: "  ", end: input.len() - 1 })
        );
    }

    #[test]
    fn standalone_at_end_of_input() {
        let input = "x\n{{/a}} ";
        let mut reader = Reader::new(input, &Delimiters::default()).unwrap();
        let (_, tag) = reader.pop_front().unwrap();
        assert_eq!(reader.standalone(&tag), Some(Standalone { indent: "", end: input.len() }));
    }

    #[test]
    fn standalone_crlf() {
        let input = "|\r\n{{#a}}\r\n|";
        let mut reader = Reader::new(input, &Delimiters::default()).unwrap();
        let (_, tag) = reader.pop_front().unwrap();
        assert_eq!(reader.standalone(&tag), Some(Standalone { indent: "", end: 11 }));
    }

    #[test]
    fn not_standalone_with_text_on_line() {
        for input in ["x {{#a}}\n", "{{#a}} x\n", "{{x}}{{#a}}\n"] {
            let mut reader = Reader::new(input, &Delimiters::default()).unwrap();
            let mut last = None;
            while let Some((_, tag)) = reader.pop_front() {
                last = Some(tag);
            }
            assert_eq!(reader.standalone(&last.unwrap()), None, "{:?}", input);
        }
    }

    #[test]
    fn switching_pattern() {
        let mut reader = Reader::new("{{a}}<%b%>{{c}}", &Delimiters::default()).unwrap();
        reader.pop_front().unwrap();
        reader.set_delimiters(&Delimiters::new("<%", "%>")).unwrap();
        let (text, tag) = reader.pop_front().unwrap();
        assert_eq!(text, "");
        assert_eq!(tag.token(), Ok(Token::Value("b", true)));
        assert!(reader.pop_front().is_none());
        assert_eq!(reader.rest(), "{{c}}");
    }

    #[test]
    fn comments_in_sections_keep_their_line() {
        assert!(Token::Comment("x").may_stand_alone(false));
        assert!(!Token::Comment("x").may_stand_alone(true));
        assert!(!Token::Value("x", true).may_stand_alone(false));
        assert!(Token::EndSection("x").may_stand_alone(true));
    }


    fn expect_sequence(input: &str, tokens: Vec<(&str, Result<Token<'_>, SyntaxError>)>) {
        let mut reader = Reader::new(input, &Delimiters::default()).unwrap();
        let mut expected = tokens.into_iter();
        loop {
            let next = reader.pop_front().map(|(text, tag)| (text, tag.token()));
            let want = expected.next();
            assert_eq!(next, want);
            if next.is_none() {
                break;
            }
        }
    }
}

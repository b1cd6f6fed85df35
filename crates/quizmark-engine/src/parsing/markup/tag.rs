use crate::parsing::cursor::Cursor;

/// Elements that never have content or a close tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Raw value with quotes stripped; `None` for a bare attribute.
    pub value: Option<String>,
}

/// A parsed open or close tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased element name.
    pub name: String,
    pub attrs: Vec<Attribute>,
    /// Ends with `/>`.
    pub self_closing: bool,
}

impl Tag {
    /// Parses the full text of a tag token (`<div class="x">` or `</div>`).
    pub fn parse(text: &str) -> Tag {
        let mut cur = Cursor::new(text);
        cur.bump(); // <
        if cur.peek() == Some(b'/') {
            cur.bump();
        }

        let name_start = cur.i;
        cur.bump_while(is_name_byte);
        let name = text[name_start..cur.i].to_ascii_lowercase();

        let mut attrs = vec![];
        let mut self_closing = false;
        loop {
            cur.bump_while(|b| b.is_ascii_whitespace());
            match cur.peek() {
                None | Some(b'>') => break,
                Some(b'/') => {
                    cur.bump();
                    if cur.peek() == Some(b'>') {
                        self_closing = true;
                    }
                }
                Some(_) => match parse_attribute(&mut cur) {
                    Some(attr) => attrs.push(attr),
                    None => {
                        cur.bump();
                    }
                },
            }
        }

        Tag {
            name,
            attrs,
            self_closing,
        }
    }

    /// True for void elements and explicitly self-closed tags.
    pub fn is_empty_element(&self) -> bool {
        self.self_closing || VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn is_attr_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/' | b'"' | b'\'')
}

fn parse_attribute(cur: &mut Cursor<'_>) -> Option<Attribute> {
    let start = cur.i;
    cur.bump_while(is_attr_name_byte);
    if cur.i == start {
        return None;
    }
    let name = cur.s[start..cur.i].to_ascii_lowercase();

    cur.bump_while(|b| b.is_ascii_whitespace());
    if cur.peek() != Some(b'=') {
        return Some(Attribute { name, value: None });
    }
    cur.bump(); // =
    cur.bump_while(|b| b.is_ascii_whitespace());

    let value = match cur.peek() {
        Some(q @ (b'"' | b'\'')) => {
            cur.bump();
            let value_start = cur.i;
            cur.bump_while(|b| b != q);
            let value = cur.s[value_start..cur.i].to_string();
            cur.bump(); // closing quote
            value
        }
        _ => {
            let value_start = cur.i;
            cur.bump_while(|b| !b.is_ascii_whitespace() && b != b'>');
            cur.s[value_start..cur.i].to_string()
        }
    };

    Some(Attribute {
        name,
        value: Some(value),
    })
}

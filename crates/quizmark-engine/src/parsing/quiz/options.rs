//! Option parsing for a single `<form>`.
//!
//! Two encodings exist:
//!
//! - **attribute**: each option `div` holds an `<input value="X">`; the
//!   value attribute is the comparison key. Used whenever any option in
//!   the form carries one, and then divs without a value are skipped.
//! - **letter**: no option carries a value attribute; the key is the first
//!   character of the option's trimmed text (`"B. Paris"` gives `"B"`).

use log::debug;

use crate::{
    parsing::{ParseOptions, markup::Element},
    segment::QuizOption,
};

use super::{clean_text, decode_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionEncoding {
    Attribute,
    Letter,
}

/// Direct child `div`s of the form.
fn option_divs(form: &Element) -> impl Iterator<Item = &Element> {
    form.child_elements().filter(|el| el.is_named("div"))
}

fn input_value(div: &Element) -> Option<&str> {
    div.find_descendant("input")?.attr_value("value")
}

pub fn detect_encoding(form: &Element) -> OptionEncoding {
    if option_divs(form).any(|div| input_value(div).is_some()) {
        OptionEncoding::Attribute
    } else {
        OptionEncoding::Letter
    }
}

/// Parses the options of `form`, in document order.
///
/// Never fails; malformed options are dropped one by one.
pub fn parse_options(form: &Element, src: &str, opts: &ParseOptions) -> Vec<QuizOption> {
    let encoding = detect_encoding(form);
    let mut out = vec![];

    for div in option_divs(form) {
        let label = clean_text(&div.text_content(src), opts);
        if label.is_empty() {
            debug!("skipping option with empty label at byte {}", div.span.start);
            continue;
        }

        let value = match encoding {
            OptionEncoding::Attribute => match input_value(div) {
                Some(v) => decode_text(v, opts),
                None => {
                    debug!("skipping option without a value attribute: {label:?}");
                    continue;
                }
            },
            OptionEncoding::Letter => label.chars().take(1).collect(),
        };

        out.push(QuizOption { value, label });
    }

    out
}

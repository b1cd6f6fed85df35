use log::debug;

use crate::parsing::{
    markup::{Element, Node},
    span::Span,
};

use super::{answer, question::question_span};

/// Class that marks an answer container `div`.
pub const ANSWER_CLASS: &str = "answer";

/// A closed `<form>` with the question text right before it.
#[derive(Debug)]
pub struct FormRegion<'t> {
    pub element: &'t Element,
    pub question: Option<Span>,
}

/// Where a correct value came from, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerMarker {
    pub span: Span,
    /// Raw extracted value; empty when the container matched no dialect.
    pub value: String,
}

#[derive(Debug, Default)]
pub struct Regions<'t> {
    pub forms: Vec<FormRegion<'t>>,
    pub markers: Vec<AnswerMarker>,
}

pub fn is_answer_container(el: &Element) -> bool {
    el.is_named("div") && el.has_class(ANSWER_CLASS)
}

/// Collects forms and answer markers in document order.
///
/// Closed forms and answer containers are not descended into, so a
/// sentence inside a container counts once and text inside a form is
/// never a marker.
pub fn collect<'t>(nodes: &'t [Node], src: &str) -> Regions<'t> {
    let mut out = Regions::default();
    walk(nodes, src, &mut out);
    out
}

fn walk<'t>(nodes: &'t [Node], src: &str, out: &mut Regions<'t>) {
    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Text(span) => {
                out.markers
                    .extend(answer::sentence_markers(span.slice(src)).map(|(local, value)| {
                        AnswerMarker {
                            span: Span {
                                start: span.start + local.start,
                                end: span.start + local.end,
                            },
                            value,
                        }
                    }));
            }
            Node::Element(el) if el.is_named("form") && el.closed => {
                out.forms.push(FormRegion {
                    element: el,
                    question: question_span(nodes, i, src),
                });
            }
            Node::Element(el) if is_answer_container(el) => {
                let value = match answer::detect(el.inner.slice(src)) {
                    Some((dialect, value)) => {
                        debug!("answer container at byte {}: {dialect:?}", el.span.start);
                        value
                    }
                    None => String::new(),
                };
                out.markers.push(AnswerMarker {
                    span: el.span,
                    value,
                });
            }
            Node::Element(el) => walk(&el.children, src, out),
        }
    }
}

use crate::parsing::span::Span;

use super::{
    lexer::{TokenKind, tokenize},
    tag::{Attribute, Tag},
};

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// A run of character data. Comments are not kept in the tree.
    Text(Span),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased element name.
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    /// From the `<` of the open tag to the `>` of the close tag (or to where
    /// the element was implicitly closed).
    pub span: Span,
    /// Between the open tag and the close tag.
    pub inner: Span,
    /// True when an explicit close tag was seen, or the element is empty by
    /// definition (`<input>`, `<br/>`).
    pub closed: bool,
}

impl Element {
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name == name)
    }

    /// Value of `name`; a bare attribute reads as the empty string.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attr(name)
            .map(|a| a.value.as_deref().unwrap_or_default())
    }

    /// True if the whitespace-separated `class` list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr_value("class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First descendant element named `name`, in document order.
    pub fn find_descendant(&self, name: &str) -> Option<&Element> {
        for el in self.child_elements() {
            if el.is_named(name) {
                return Some(el);
            }
            if let Some(found) = el.find_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated text of all descendant text nodes, untrimmed.
    pub fn text_content(&self, src: &str) -> String {
        let mut out = String::new();
        collect_text(&self.children, src, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], src: &str, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(sp) => out.push_str(sp.slice(src)),
            Node::Element(el) => collect_text(&el.children, src, out),
        }
    }
}

/// An element whose close tag has not been seen yet.
struct OpenFrame {
    tag: Tag,
    start: usize,
    inner_start: usize,
    children: Vec<Node>,
}

impl OpenFrame {
    fn close(self, inner_end: usize, end: usize, closed: bool) -> Element {
        Element {
            name: self.tag.name,
            attrs: self.tag.attrs,
            children: self.children,
            span: Span {
                start: self.start,
                end,
            },
            inner: Span {
                start: self.inner_start,
                end: inner_end,
            },
            closed,
        }
    }
}

/// Stack-based tree construction over the token stream.
struct TreeBuilder {
    stack: Vec<OpenFrame>,
    root: Vec<Node>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![],
            root: vec![],
        }
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.root.push(node),
        }
    }

    fn open(&mut self, tag: Tag, span: Span) {
        if tag.is_empty_element() {
            let el = OpenFrame {
                tag,
                start: span.start,
                inner_start: span.end,
                children: vec![],
            }
            .close(span.end, span.end, true);
            self.append(Node::Element(el));
        } else {
            self.stack.push(OpenFrame {
                tag,
                start: span.start,
                inner_start: span.end,
                children: vec![],
            });
        }
    }

    fn close(&mut self, name: &str, span: Span) {
        // Stray close tags are ignored.
        let Some(depth) = self.stack.iter().rposition(|f| f.tag.name == name) else {
            return;
        };
        // Anything opened above the match ends where the close tag starts.
        while self.stack.len() > depth + 1 {
            self.pop(span.start, span.start, false);
        }
        self.pop(span.start, span.end, true);
    }

    fn pop(&mut self, inner_end: usize, end: usize, closed: bool) {
        if let Some(frame) = self.stack.pop() {
            let el = frame.close(inner_end, end, closed);
            self.append(Node::Element(el));
        }
    }

    fn finish(mut self, len: usize) -> Vec<Node> {
        while !self.stack.is_empty() {
            self.pop(len, len, false);
        }
        self.root
    }
}

/// Builds the markup tree for `src`.
pub fn build_tree(src: &str) -> Vec<Node> {
    let mut builder = TreeBuilder::new();

    for tok in tokenize(src) {
        match tok.kind {
            TokenKind::Text => builder.append(Node::Text(tok.span)),
            TokenKind::Comment => {}
            TokenKind::OpenTag => builder.open(Tag::parse(tok.span.slice(src)), tok.span),
            TokenKind::CloseTag => {
                let tag = Tag::parse(tok.span.slice(src));
                builder.close(&tag.name, tok.span);
            }
        }
    }

    builder.finish(src.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn only_element(nodes: &[Node]) -> &Element {
        match nodes {
            [Node::Element(el)] => el,
            other => panic!("expected a single element, got {other:?}"),
        }
    }

    #[test]
    fn nests_elements() {
        let src = "<form><div><input value=\"A\"/> A</div></form>";
        let nodes = build_tree(src);
        let form = only_element(&nodes);
        assert!(form.is_named("form"));
        assert!(form.closed);
        assert_eq!(form.span.slice(src), src);
        assert_eq!(form.inner.slice(src), "<div><input value=\"A\"/> A</div>");

        let div = form.child_elements().next().unwrap();
        let input = div.find_descendant("input").unwrap();
        assert_eq!(input.attr_value("value"), Some("A"));
        assert_eq!(div.text_content(src), " A");
    }

    #[test]
    fn void_input_without_slash_does_not_swallow_siblings() {
        let src = "<div><input value=\"A\"> A</div><div>B</div>";
        let nodes = build_tree(src);
        assert_eq!(nodes.len(), 2);
        let first = match &nodes[0] {
            Node::Element(el) => el,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(first.text_content(src), " A");
    }

    #[test]
    fn unclosed_element_runs_to_end() {
        let src = "<form><div>x</div>";
        let form = only_element(&build_tree(src)).clone();
        assert!(!form.closed);
        assert_eq!(form.span.end, src.len());
    }

    #[test]
    fn close_tag_closes_intervening_elements() {
        let src = "<form><div>x</form>tail";
        let nodes = build_tree(src);
        let form = match &nodes[0] {
            Node::Element(el) => el,
            other => panic!("unexpected {other:?}"),
        };
        assert!(form.closed);
        assert_eq!(form.span.slice(src), "<form><div>x</form>");
        let div = form.child_elements().next().unwrap();
        assert!(!div.closed);
        assert_eq!(div.span.slice(src), "<div>x");
        assert_eq!(nodes[1], Node::Text(Span::new(19, 23)));
    }

    #[test]
    fn stray_close_tag_is_ignored() {
        let src = "a</div>b";
        let nodes = build_tree(src);
        assert_eq!(
            nodes,
            vec![Node::Text(Span::new(0, 1)), Node::Text(Span::new(7, 8))]
        );
    }

    #[test]
    fn class_list_lookup() {
        let src = "<div class=\"quiz answer\">x</div>";
        let div = only_element(&build_tree(src)).clone();
        assert!(div.has_class("answer"));
        assert!(div.has_class("quiz"));
        assert!(!div.has_class("ans"));
    }

    #[test]
    fn bare_attribute_reads_empty() {
        let src = "<input value>";
        let input = only_element(&build_tree(src)).clone();
        assert_eq!(input.attr_value("value"), Some(""));
        assert_eq!(input.attr_value("type"), None);
    }

    #[test]
    fn comments_are_dropped() {
        let src = "<div>a<!-- hidden -->b</div>";
        let div = only_element(&build_tree(src)).clone();
        assert_eq!(div.text_content(src), "ab");
    }
}

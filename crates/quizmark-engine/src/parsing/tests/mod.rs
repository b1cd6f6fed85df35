//! Integration tests for the parsing module.
//!
//! Fixtures (.txt) and snapshots (.snap) are co-located in `fixtures/`.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{
    interaction::{OptionMark, QuizState},
    parsing::{ParseOptions, parse_message, snapshot},
    segment::{ParsedMessage, QuizBlock, Segment},
};

// Fixture-based snapshot tests

#[test]
fn fixture_plain_prose() {
    assert_fixture("plain_prose");
}

#[test]
fn fixture_code_fences() {
    assert_fixture("code_fences");
}

#[test]
fn fixture_value_tag_quiz() {
    assert_fixture("value_tag_quiz");
}

#[test]
fn fixture_letter_options_quiz() {
    assert_fixture("letter_options_quiz");
}

#[test]
fn fixture_hidden_sentence_quiz() {
    assert_fixture("hidden_sentence_quiz");
}

#[test]
fn fixture_mixed_code_and_quiz() {
    assert_fixture("mixed_code_and_quiz");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let content = std::fs::read_to_string(format!("{fixtures_dir}/{name}.txt")).unwrap();

    let message = parse(&content);
    snapshot::invariants(&content, &message);

    let snap = snapshot::normalize(&message);
    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, snap.to_string());
    });
}

fn parse(content: &str) -> ParsedMessage {
    parse_message(content, &ParseOptions::default())
}

fn quiz_blocks(message: &ParsedMessage) -> Vec<&QuizBlock> {
    message.quiz_blocks().map(|(_, b)| b).collect()
}

// Pipeline properties

#[rstest]
#[case::prose("Hello there, how can I help?")]
#[case::inline_html("Use <b>bold</b> and <i>italics</i>.")]
#[case::leading_and_trailing_space("  padded text \n")]
#[case::single_backticks("call `foo()` then ``bar``")]
#[case::unclosed_form("<form><div>A. x</div>")]
fn text_without_markup_is_identity(#[case] content: &str) {
    let message = parse(content);
    assert_eq!(message.segments, vec![Segment::text(content)]);
}

#[test]
fn empty_content_has_no_segments() {
    assert!(parse("").is_empty());
}

#[test]
fn reparsing_text_output_is_a_no_op() {
    let content = "No quiz, no code, just <em>words</em>.";
    let first = parse(content);
    let Segment::Text { raw } = &first.segments[0] else {
        panic!("expected text");
    };
    assert_eq!(parse(raw), first);
}

#[test]
fn fence_extraction() {
    let message = parse("a ```py\nprint(1)\n``` b");
    assert_eq!(
        message.segments,
        vec![
            Segment::text("a "),
            Segment::Code {
                language: "py".into(),
                body: "print(1)\n".into(),
            },
            Segment::text(" b"),
        ]
    );
}

#[test]
fn unterminated_fence_is_one_text_segment() {
    let content = "a ```py\nprint(1)";
    let message = parse(content);
    assert_eq!(message.segments, vec![Segment::text(content)]);
}

#[test]
fn fallback_language_is_configurable() {
    let options = ParseOptions {
        fallback_language: "text".into(),
        ..ParseOptions::default()
    };
    let message = parse_message("```\nx\n```", &options);
    assert_eq!(
        message.segments,
        vec![Segment::Code {
            language: "text".into(),
            body: "x\n".into(),
        }]
    );
}

#[test]
fn quiz_markup_inside_code_is_not_extracted() {
    let content = "```html\n<form><div><input value=\"A\"> A</div></form>\n```";
    let message = parse(content);
    assert_eq!(message.len(), 1);
    assert_eq!(message.segments[0].kind(), "code");
}

#[test]
fn value_tag_answer_reveals_marks() {
    let message = parse(
        "Pick one\n<form>\
         <div><input value=\"A\"> Alpha</div>\
         <div><input value=\"B\"> Beta</div>\
         <div><input value=\"C\"> Gamma</div>\
         </form>\
         <div class=\"answer\"><value>B</value></div>",
    );
    let blocks = quiz_blocks(&message);
    assert_eq!(blocks.len(), 1);
    let block = blocks[0];
    assert_eq!(block.correct_option_value, "B");

    let mut state = QuizState::new();
    state.choose(block, "A").unwrap();
    state.submit().unwrap();
    let view = state.view(block);
    let marks: Vec<_> = view.options.iter().map(|o| (o.value.as_str(), o.mark)).collect();
    assert_eq!(
        marks,
        vec![
            ("A", OptionMark::Incorrect),
            ("B", OptionMark::Correct),
            ("C", OptionMark::Neutral),
        ]
    );
}

#[test]
fn positional_pairing_with_single_marker() {
    let message = parse(
        "First?<form><div>A. one</div><div>B. two</div></form>\n\
         Second?<form><div>A. three</div><div>B. four</div></form>\n\
         Correct Answer: B",
    );
    let blocks = quiz_blocks(&message);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].correct_option_value, "B");
    assert_eq!(blocks[1].correct_option_value, "");

    let mut state = QuizState::new();
    state.choose(blocks[1], "A").unwrap();
    state.submit().unwrap();
    assert!(state.view(blocks[1]).no_recorded_answer);
}

#[test]
fn option_without_value_is_dropped_others_still_work() {
    let message = parse(
        "<form>\
         <div><input value=\"A\"> Alpha</div>\
         <div><input type=\"radio\"> Broken</div>\
         <div><input value=\"C\"> Gamma</div>\
         </form>\
         <div class=\"answer\"><value>C</value></div>",
    );
    let block = quiz_blocks(&message)[0];
    let values: Vec<_> = block.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["A", "C"]);

    let mut state = QuizState::new();
    state.choose(block, "C").unwrap();
    state.submit().unwrap();
    let view = state.view(block);
    assert_eq!(view.options[1].mark, OptionMark::Correct);
    assert_eq!(view.options[0].mark, OptionMark::Neutral);
}

#[test]
fn form_without_options_degrades_to_text() {
    let message = parse("Intro <form><p>nothing</p></form>");
    assert!(quiz_blocks(&message).is_empty());
    assert_eq!(
        message.segments,
        vec![
            Segment::text("Intro "),
            Segment::text("<form><p>nothing</p></form>"),
        ]
    );
}

#[test]
fn broken_quiz_does_not_affect_siblings() {
    let message = parse(
        "```sh\necho hi\n```\n<form></form>\
         Q?<form><div><input value=\"A\"> Yes</div></form>\
         <div class=\"answer\"><value>A</value></div>",
    );
    assert_eq!(message.segments[0].kind(), "code");
    let blocks = quiz_blocks(&message);
    assert_eq!(blocks.len(), 1);
    // the empty form consumed the first marker position
    assert_eq!(blocks[0].correct_option_value, "");
    assert_eq!(blocks[0].question, "Q?");
}

#[test]
fn prose_around_quiz_is_kept_verbatim() {
    let content = "  Intro:\n\n<form>\n  <div><input value=\"A\"> Yes</div>\n</form>\n\
                   <div class=\"answer\"><value>A</value></div>\n\n  \
                   Outro with `</div` and spaces   ";
    let message = parse(content);
    snapshot::invariants(content, &message);

    let texts: Vec<_> = message
        .segments
        .iter()
        .filter_map(|s| match s {
            Segment::Text { raw } => Some(raw.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            "  Intro:\n\n",
            "\n<div class=\"answer\"><value>A</value></div>\n\n  Outro with `</div` and spaces   ",
        ]
    );
    let block = quiz_blocks(&message)[0];
    assert_eq!(block.question, "Intro:");
    assert_eq!(block.correct_option_value, "A");
}

#[test]
fn form_with_broken_end_tag_and_no_options_is_raw_text() {
    let content = "<form>\n  <p>no options</p>\n</form";
    assert_eq!(parse(content).segments, vec![Segment::text(content)]);
}

#[test]
fn answer_sentence_does_not_leak_into_next_question() {
    let message = parse(
        "Q1?\n<form><div>A. one</div><div>B. two</div></form>\nCorrect Answer: A\n\
         Q2?\n<form><div>A. three</div><div>B. four</div></form>\nCorrect Answer: B",
    );
    let pairs: Vec<_> = quiz_blocks(&message)
        .iter()
        .map(|b| (b.question.as_str(), b.correct_option_value.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Q1?", "A"), ("Q2?", "B")]);
}

#[test]
fn serializes_as_kind_payload_sequence() {
    let message = parse("Hi ```js\n1\n```");
    let json = serde_json::to_string(&message).unwrap();
    assert_eq!(
        json,
        concat!(
            r#"[{"kind":"text","payload":{"raw":"Hi "}},"#,
            r#"{"kind":"code","payload":{"language":"js","body":"1\n"}}]"#
        )
    );
}

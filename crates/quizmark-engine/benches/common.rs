// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_prose_message(size: usize) -> String {
    let base = "Here is an explanation with <b>some</b> inline markup.\n\n\
                ```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_quiz_message(quizzes: usize) -> String {
    let mut content = String::from("Let's check what you remember.\n\n");

    for i in 0..quizzes {
        content.push_str(&format!("Question {}: which option is right?\n<form>\n", i));
        for letter in ["A", "B", "C", "D"] {
            content.push_str(&format!(
                "  <div><input type=\"radio\" name=\"q{i}\" value=\"{letter}\"> \
                 {letter}. Choice {letter}</div>\n"
            ));
        }
        content.push_str("</form>\n<div class=\"answer\"><value>C</value></div>\n\n");
    }

    content
}

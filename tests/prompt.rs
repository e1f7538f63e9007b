// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

use reviewdeck::services::prompt;

// ─── Review prompt ───────────────────────────────────────────────────────────

#[test]
fn review_prompt_contains_submitted_code() {
    let code = "fn main() {\n    println!(\"hi\");\n}";
    let prompt = prompt::review_prompt(code);
    assert!(prompt.contains(code), "prompt must carry the code verbatim");
}

#[test]
fn review_prompt_requests_all_three_sections() {
    let prompt = prompt::review_prompt("x = 1");
    assert!(prompt.contains("Code Readability"));
    assert!(prompt.contains("Performance"));
    assert!(prompt.contains("Best Practices"));
}

// ─── Question prompt ─────────────────────────────────────────────────────────

#[test]
fn question_prompt_contains_code_and_question() {
    let code = "def f(): pass";
    let question = "why is this slow?";
    let prompt = prompt::question_prompt(code, question);
    assert!(prompt.contains(code));
    assert!(prompt.contains(question));
}

#[test]
fn question_prompt_places_code_before_question() {
    let prompt = prompt::question_prompt("CODE_MARKER", "QUESTION_MARKER");
    let code_pos = prompt.find("CODE_MARKER").unwrap();
    let question_pos = prompt.find("QUESTION_MARKER").unwrap();
    assert!(code_pos < question_pos, "code context comes first");
}

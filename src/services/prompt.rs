// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Builds the instruction text sent alongside a code submission.
//!
//! The model's reply is displayed verbatim; the only structure we impose is
//! the three review sections requested here.

/// Fixed review instruction wrapped around every submission.
pub fn review_prompt(code: &str) -> String {
    format!(
        r#"Please review the following code and provide actionable suggestions under these three categories:

1. Code Readability:
   - Provide 2-3 concise and specific suggestions.
   - Include short examples if possible.

2. Performance:
   - Provide 2-3 concise and specific suggestions.
   - Include short examples if possible.

3. Best Practices:
   - Provide 2-3 concise and specific suggestions.
   - Include short examples if possible.

Important:
- Do not skip any category.
- Use clear headings for each category exactly as above.
- Use bullet points or numbers for suggestions.

Code:
{code}
"#
    )
}

/// Instruction for a free-form question asked against a code submission.
pub fn question_prompt(code: &str, question: &str) -> String {
    format!(
        r#"You are an expert programming assistant.

RULES:
1. If the user asks for CODE, return only code.
2. If the user asks to EXPLAIN, explain clearly (line by line if needed).
3. If the user asks to REVIEW or IMPROVE, use these sections:
   Code Readability, Performance, Best Practices.
4. Do not add unnecessary sections.

Code Context:
{code}

User Question:
{question}
"#
    )
}

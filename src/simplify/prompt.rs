// src/simplify/prompt.rs
// Instruction and prompt text for fidelity-preserving rewrites

/// Sentence length cap given to the model.
pub fn max_sentence_words(grade: u8) -> usize {
    if grade <= 3 {
        10
    } else {
        15
    }
}

/// Fixed system instruction: rewrite at `grade` keeping every fact.
pub fn system_instruction(grade: u8) -> String {
    let max_words = max_sentence_words(grade);
    format!(
        r#"You are an expert linguist helping people with aphasia read complex text.

TASK: Rewrite the text at a Grade {grade} reading level while keeping EVERY fact.

Example of a wrong rewrite:
Original: "We lament deaths that shorten great careers, as with Mary Wollstonecraft or John Keats."
Wrong: "We lament deaths that shorten great careers, as with." (names are missing)

Example of a correct rewrite:
Original: "We lament deaths that shorten great careers, as with Mary Wollstonecraft or John Keats."
Right: "We are sad when great people die young. Mary Wollstonecraft died young. John Keats died young."

RULES:
1. Keep every person, place, date, number and action from the original.
2. Simplify, do not summarize. If the original mentions three things, mention three things.
3. Use at most {max_words} words per sentence.
4. Replace hard words with common everyday words.
5. Put one idea in each sentence. Split long sentences into several short ones.
6. Write complete sentences. Never stop mid-sentence or leave fragments.
7. Do not truncate. The rewrite should be about as long as the original.

Before answering, check that every name and fact in the original appears in your rewrite."#
    )
}

/// Per-request prompt embedding the literal input text.
pub fn user_prompt(text: &str, grade: u8) -> String {
    let max_words = max_sentence_words(grade);
    format!(
        r#"Rewrite this text for Grade {grade} readers. Keep ALL facts and names.

Original text:
{text}

Instructions:
- Break long sentences into short ones ({max_words} words max)
- Use simple everyday words
- Keep every name, number, date and fact
- Make each sentence complete and clear
- This is NOT a summary: include everything

Simplified text:"#
    )
}

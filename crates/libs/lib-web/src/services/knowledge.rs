//! # Knowledge Service
//!
//! Turns pasted free text into question/answer entries for the robot.
//!
//! Non-blank lines are paired in order: line 1 is a question, line 2 its answer,
//! and so on; an odd trailing line is dropped. When no pair forms, the whole text
//! becomes a single "General question" entry whose answer is the first 200
//! characters (with `...` appended when cut).

use shared::KnowledgeItem;

const DEFAULT_CATEGORY: &str = "general";
const FALLBACK_QUESTION: &str = "General question";
const FALLBACK_ANSWER_CHARS: usize = 200;

pub fn parse_knowledge(text: &str) -> Vec<KnowledgeItem> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut items: Vec<KnowledgeItem> = lines
        .chunks_exact(2)
        .enumerate()
        .map(|(pair, qa)| item(format!("item_{}", pair * 2), qa[0], qa[1].to_string()))
        .collect();

    if items.is_empty() {
        items.push(item("item_1".to_string(), FALLBACK_QUESTION, fallback_answer(text)));
    }

    items
}

fn item(id: String, question: &str, answer: String) -> KnowledgeItem {
    KnowledgeItem {
        id,
        question: question.to_string(),
        answer,
        category: DEFAULT_CATEGORY.to_string(),
        is_active: true,
    }
}

fn fallback_answer(text: &str) -> String {
    let mut answer: String = text.chars().take(FALLBACK_ANSWER_CHARS).collect();
    if text.chars().count() > FALLBACK_ANSWER_CHARS {
        answer.push_str("...");
    }
    answer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_lines_in_order() {
        let text = "What do you sell?\nCall robots.\n\n  How much?  \nFrom 490 rubles.\n";
        let items = parse_knowledge(text);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "item_0");
        assert_eq!(items[0].question, "What do you sell?");
        assert_eq!(items[0].answer, "Call robots.");
        assert_eq!(items[1].id, "item_2");
        assert_eq!(items[1].question, "How much?");
        assert!(items.iter().all(|i| i.is_active && i.category == "general"));
    }

    #[test]
    fn test_odd_trailing_line_dropped() {
        let items = parse_knowledge("Q1\nA1\nDangling question");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer, "A1");
    }

    #[test]
    fn test_single_line_falls_back() {
        let items = parse_knowledge("We only have one long line of text");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "item_1");
        assert_eq!(items[0].question, "General question");
        assert_eq!(items[0].answer, "We only have one long line of text");
    }

    #[test]
    fn test_fallback_truncates_at_200_chars() {
        let text = "я".repeat(250);
        let items = parse_knowledge(&text);

        let answer = &items[0].answer;
        assert!(answer.ends_with("..."));
        assert_eq!(answer.chars().count(), 203);
    }
}

use std::collections::HashMap;

pub use crate::config::*;

/// Collects the answers of one quiz attempt.
///
/// A question can be answered several times: the most recent answer replaces
/// the previous one, at the position of the first answer.
///
/// ```
/// use candidate_match::builder::AnswerSheet;
/// use candidate_match::{run_matching, Alignment, Candidate};
///
/// let mut sheet = AnswerSheet::new();
/// sheet.answer("q1", "a", "progressive");
/// sheet.answer("q2", "c", "conservative");
/// sheet.answer("q2", "b", "progressive");
///
/// let roster = vec![Candidate {
///     name: "Anna".to_string(),
///     party: "Green".to_string(),
///     alignment: Alignment::Progressive,
/// }];
/// let summary = run_matching(sheet.answers(), &roster);
/// assert_eq!(summary.ranking[0].percentage, 100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: Vec<QuizAnswer>,
    positions: HashMap<String, usize>,
}

impl AnswerSheet {
    pub fn new() -> AnswerSheet {
        AnswerSheet::default()
    }

    /// Builds a sheet by replaying the answers in order.
    pub fn from_answers<I: IntoIterator<Item = QuizAnswer>>(answers: I) -> AnswerSheet {
        let mut sheet = AnswerSheet::new();
        for a in answers {
            sheet.add_answer(a);
        }
        sheet
    }

    /// Records an answer given as plain labels.
    pub fn answer(&mut self, question_id: &str, option_id: &str, alignment: &str) {
        self.add_answer(QuizAnswer {
            question_id: question_id.to_string(),
            option_id: option_id.to_string(),
            alignment: Alignment::parse(alignment),
        });
    }

    /// Records an answer. Returns the previous answer to the same question, if any.
    pub fn add_answer(&mut self, answer: QuizAnswer) -> Option<QuizAnswer> {
        match self.positions.get(&answer.question_id) {
            Some(&idx) => Some(std::mem::replace(&mut self.answers[idx], answer)),
            None => {
                self.positions
                    .insert(answer.question_id.clone(), self.answers.len());
                self.answers.push(answer);
                None
            }
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&QuizAnswer> {
        self.positions.get(question_id).map(|&idx| &self.answers[idx])
    }

    /// The answers, one per question.
    pub fn answers(&self) -> &[QuizAnswer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reanswering_replaces_in_place() {
        let mut sheet = AnswerSheet::new();
        sheet.answer("q1", "a", "progressive");
        sheet.answer("q2", "b", "moderate");
        let previous = sheet.add_answer(QuizAnswer {
            question_id: "q1".to_string(),
            option_id: "c".to_string(),
            alignment: Alignment::Conservative,
        });

        assert_eq!(previous.map(|a| a.option_id), Some("a".to_string()));
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.answers()[0].option_id, "c");
        assert_eq!(sheet.answers()[0].alignment, Alignment::Conservative);
        assert_eq!(sheet.answers()[1].question_id, "q2");
    }

    #[test]
    fn from_answers_keeps_latest() {
        let answers = vec![
            QuizAnswer {
                question_id: "q1".to_string(),
                option_id: "a".to_string(),
                alignment: Alignment::Moderate,
            },
            QuizAnswer {
                question_id: "q1".to_string(),
                option_id: "b".to_string(),
                alignment: Alignment::Progressive,
            },
        ];
        let sheet = AnswerSheet::from_answers(answers);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get("q1").map(|a| a.option_id.as_str()), Some("b"));
        assert!(sheet.get("q2").is_none());
    }

    #[test]
    fn clear_forgets_everything() {
        let mut sheet = AnswerSheet::new();
        sheet.answer("q1", "a", "progressive");
        sheet.clear();
        assert!(sheet.is_empty());
        assert!(sheet.get("q1").is_none());
        sheet.answer("q1", "b", "moderate");
        assert_eq!(sheet.len(), 1);
    }
}

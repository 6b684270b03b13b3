mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

use std::collections::HashMap;

pub use crate::config::*;

/// Computes how well each candidate matches a set of quiz answers.
///
/// Arguments:
/// * `answers` the answers of the user. If a question was answered several times,
/// only the last answer counts.
/// * `candidates` the roster. Its order is used to break ties.
///
/// The match percentage of a candidate is the share of answered questions whose
/// alignment equals the alignment of the candidate, rounded to the nearest integer
/// (halves are rounded up). With no answer, every candidate is at 0%.
pub fn run_matching(answers: &[QuizAnswer], candidates: &[Candidate]) -> MatchSummary {
    info!(
        "run_matching: Processing {:?} answers, {:?} candidates",
        answers.len(),
        candidates.len()
    );

    let latest = latest_answers(answers);
    let answered = latest.len() as u32;
    debug!(
        "run_matching: {:?} distinct questions answered: {:?}",
        answered, latest
    );

    let tally = alignment_tally(&latest);
    debug!("run_matching: alignment tally: {:?}", tally);

    let mut scored: Vec<(&Candidate, u32, u32)> = candidates
        .iter()
        .map(|c| {
            let matching = tally.get(&c.alignment).cloned().unwrap_or(0);
            (c, matching, percentage(matching, answered))
        })
        .collect();
    // Stable: candidates with the same percentage stay in roster order.
    scored.sort_by(|a, b| b.2.cmp(&a.2));

    let ranking: Vec<MatchResult> = scored
        .iter()
        .enumerate()
        .map(|(pos, (c, matching, pct))| MatchResult {
            rank: (pos + 1) as u32,
            name: c.name.clone(),
            party: c.party.clone(),
            alignment: c.alignment.clone(),
            matching: *matching,
            percentage: *pct,
        })
        .collect();

    for r in ranking.iter() {
        info!(
            "Rank {}: {} ({}, {}) -> {}% ({}/{})",
            r.rank, r.name, r.party, r.alignment, r.percentage, r.matching, answered
        );
    }

    MatchSummary { answered, ranking }
}

// Keeps the last answer for every question, in order of first appearance.
fn latest_answers(answers: &[QuizAnswer]) -> Vec<&QuizAnswer> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut res: Vec<&QuizAnswer> = Vec::new();
    for a in answers.iter() {
        match positions.get(a.question_id.as_str()) {
            Some(&idx) => {
                debug!(
                    "latest_answers: question {:?} answered again: {:?} -> {:?}",
                    a.question_id, res[idx].option_id, a.option_id
                );
                res[idx] = a;
            }
            None => {
                positions.insert(a.question_id.as_str(), res.len());
                res.push(a);
            }
        }
    }
    res
}

fn alignment_tally<'a>(answers: &[&'a QuizAnswer]) -> HashMap<&'a Alignment, u32> {
    let mut tally: HashMap<&Alignment, u32> = HashMap::new();
    for a in answers.iter() {
        *tally.entry(&a.alignment).or_insert(0) += 1;
    }
    tally
}

/// Integer percentage of `matching` over `total`, rounded half up.
fn percentage(matching: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (m, t) = (matching as u64, total as u64);
    ((200 * m + t) / (2 * t)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn answer(q: &str, alignment: Alignment) -> QuizAnswer {
        QuizAnswer {
            question_id: q.to_string(),
            option_id: format!("{}-opt", q),
            alignment,
        }
    }

    fn candidate(name: &str, alignment: Alignment) -> Candidate {
        Candidate {
            name: name.to_string(),
            party: format!("{} party", name),
            alignment,
        }
    }

    fn roster() -> Vec<Candidate> {
        vec![
            candidate("Alice", Alignment::Progressive),
            candidate("Bob", Alignment::Conservative),
            candidate("Carol", Alignment::Moderate),
        ]
    }

    fn names(summary: &MatchSummary) -> Vec<&str> {
        summary.ranking.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn two_thirds_progressive() {
        init();
        let answers = vec![
            answer("q1", Alignment::Progressive),
            answer("q2", Alignment::Progressive),
            answer("q3", Alignment::Moderate),
        ];
        let summary = run_matching(&answers, &roster());

        assert_eq!(summary.answered, 3);
        assert_eq!(names(&summary), vec!["Alice", "Carol", "Bob"]);
        let pcts: Vec<u32> = summary.ranking.iter().map(|r| r.percentage).collect();
        assert_eq!(pcts, vec![67, 33, 0]);
        let ranks: Vec<u32> = summary.ranking.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(summary.ranking[0].matching, 2);
    }

    #[test]
    fn no_answers_keeps_roster_order() {
        init();
        let summary = run_matching(&[], &roster());
        assert_eq!(summary.answered, 0);
        assert_eq!(names(&summary), vec!["Alice", "Bob", "Carol"]);
        assert!(summary.ranking.iter().all(|r| r.percentage == 0));
        assert_eq!(summary.top().map(|r| r.name.as_str()), Some("Alice"));
    }

    #[test]
    fn ties_keep_roster_order() {
        init();
        let answers = vec![
            answer("q1", Alignment::Conservative),
            answer("q2", Alignment::Moderate),
        ];
        let summary = run_matching(&answers, &roster());
        assert_eq!(names(&summary), vec!["Bob", "Carol", "Alice"]);
        assert_eq!(summary.ranking[0].percentage, 50);
        assert_eq!(summary.ranking[1].percentage, 50);
    }

    #[test]
    fn reanswer_only_changes_that_question() {
        init();
        let mut answers = vec![
            answer("q1", Alignment::Progressive),
            answer("q2", Alignment::Progressive),
            answer("q3", Alignment::Moderate),
        ];
        answers.push(answer("q1", Alignment::Conservative));
        let summary = run_matching(&answers, &roster());

        assert_eq!(summary.answered, 3);
        let by_name: HashMap<&str, u32> = summary
            .ranking
            .iter()
            .map(|r| (r.name.as_str(), r.percentage))
            .collect();
        assert_eq!(by_name["Alice"], 33);
        assert_eq!(by_name["Bob"], 33);
        assert_eq!(by_name["Carol"], 33);
        assert_eq!(names(&summary), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn idempotent() {
        init();
        let answers = vec![
            answer("q1", Alignment::Moderate),
            answer("q2", Alignment::Progressive),
            answer("q3", Alignment::Moderate),
        ];
        let first = run_matching(&answers, &roster());
        let second = run_matching(&answers, &roster());
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_labels_are_normalized() {
        init();
        let answers = vec![
            answer("q1", Alignment::parse(" Libertarian ")),
            answer("q2", Alignment::parse("MODERATE")),
        ];
        let candidates = vec![
            candidate("Dan", Alignment::parse("libertarian")),
            candidate("Carol", Alignment::Moderate),
        ];
        let summary = run_matching(&answers, &candidates);
        assert_eq!(summary.ranking[0].percentage, 50);
        assert_eq!(summary.ranking[1].percentage, 50);
        assert_eq!(names(&summary), vec!["Dan", "Carol"]);
    }

    #[test]
    fn empty_roster() {
        init();
        let summary = run_matching(&[answer("q1", Alignment::Moderate)], &[]);
        assert_eq!(summary.answered, 1);
        assert!(summary.top().is_none());
    }

    #[test]
    fn rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(1, 201), 0);
        assert_eq!(percentage(7, 7), 100);
    }
}

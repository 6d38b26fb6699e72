//! Quiz: the shared all-players game.
//!
//! While a round is active every line from every connection is captured
//! as an answer; the round ends when its wall-clock deadline fires and
//! delivers a synthetic expiry event through the server's event loop.

use rand::seq::SliceRandom;
use rand::Rng;

/// How a submitted answer is compared against the correct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Case-insensitive full-string equality.
    Exact,
    /// The correct answer must appear, case-insensitively, within the
    /// submitted text.
    Substring,
}

#[derive(Debug)]
pub struct Question {
    pub prompt: &'static str,
    pub answer: &'static str,
    pub comparison: Comparison,
}

pub static QUESTIONS: &[Question] = &[
    Question {
        prompt: "How many bytes in one kilobyte?",
        answer: "1024",
        comparison: Comparison::Exact,
    },
    Question {
        prompt: "What is the capital of Belarus?",
        answer: "Minsk",
        comparison: Comparison::Exact,
    },
    Question {
        prompt: "Who is the creator of the Python?",
        answer: "Guido",
        comparison: Comparison::Substring,
    },
];

/// One active quiz round. At most one exists process-wide.
#[derive(Debug)]
pub struct QuizRound {
    question: &'static Question,
    winner: Option<String>,
    transcript: String,
    /// Ties the round to its armed deadline; a stale expiry event for an
    /// earlier round is ignored.
    pub round: u64,
}

impl QuizRound {
    pub fn new(round: u64, rng: &mut impl Rng) -> Self {
        let question = QUESTIONS.choose(rng).unwrap_or(&QUESTIONS[0]);
        Self::with_question(round, question)
    }

    fn with_question(round: u64, question: &'static Question) -> Self {
        Self {
            question,
            winner: None,
            transcript: String::new(),
            round,
        }
    }

    /// Broadcast sent to everyone when the round starts.
    pub fn intro(&self) -> String {
        format!(
            "Let's start Quiz round!\nYou have 30 sec and you can send several answers\n{}",
            self.question.prompt
        )
    }

    /// Records an answer. The first correct answer fixes the winner;
    /// later correct answers do not change it.
    pub fn submit(&mut self, name: &str, answer: &str) {
        self.transcript.push_str(&format!("[{}] {}\n", name, answer));
        if self.winner.is_none() && self.is_correct(answer) {
            self.winner = Some(name.to_string());
        }
    }

    fn is_correct(&self, answer: &str) -> bool {
        let answer = answer.to_lowercase();
        let correct = self.question.answer.to_lowercase();
        match self.question.comparison {
            Comparison::Exact => answer == correct,
            Comparison::Substring => answer.contains(&correct),
        }
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Closing broadcast: the transcript, the correct answer and the
    /// winner, or a no-answer notice if nobody played.
    pub fn summary(&self) -> String {
        if self.transcript.is_empty() {
            return "Nobody sent an answer. No winner!".to_string();
        }
        let mut text = format!(
            "Participants' answer(s):\n{}The right answer: {}\n",
            self.transcript, self.question.answer
        );
        match &self.winner {
            Some(winner) => text.push_str(&format!("The winner is {}! Congratulations!", winner)),
            None => text.push_str("No winner!"),
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn exact_round() -> QuizRound {
        QuizRound::with_question(1, &QUESTIONS[0]) // answer "1024", Exact
    }

    fn substring_round() -> QuizRound {
        QuizRound::with_question(1, &QUESTIONS[2]) // answer "Guido", Substring
    }

    #[test]
    fn exact_comparison_requires_full_equality() {
        let mut round = exact_round();
        round.submit("Alice", "1025");
        assert_eq!(round.winner(), None);
        round.submit("Bob", "1024");
        assert_eq!(round.winner(), Some("Bob"));
    }

    #[test]
    fn substring_comparison_is_case_insensitive_containment() {
        let mut round = substring_round();
        round.submit("Alice", "guid");
        assert_eq!(round.winner(), None);
        round.submit("Bob", "Guido van Rossum");
        assert_eq!(round.winner(), Some("Bob"));
    }

    #[test]
    fn first_correct_answer_sticks() {
        let mut round = exact_round();
        round.submit("Alice", "1024");
        round.submit("Bob", "1024");
        assert_eq!(round.winner(), Some("Alice"));
    }

    #[test]
    fn summary_without_answers() {
        let round = exact_round();
        assert_eq!(round.summary(), "Nobody sent an answer. No winner!");
    }

    #[test]
    fn summary_lists_transcript_answer_and_winner() {
        let mut round = exact_round();
        round.submit("Alice", "512");
        round.submit("Bob", "1024");
        let summary = round.summary();
        assert!(summary.starts_with("Participants' answer(s):\n"));
        assert!(summary.contains("[Alice] 512\n"));
        assert!(summary.contains("[Bob] 1024\n"));
        assert!(summary.contains("The right answer: 1024\n"));
        assert!(summary.ends_with("The winner is Bob! Congratulations!"));
    }

    #[test]
    fn summary_without_winner_still_shows_answers() {
        let mut round = exact_round();
        round.submit("Alice", "42");
        let summary = round.summary();
        assert!(summary.contains("[Alice] 42\n"));
        assert!(summary.ends_with("No winner!"));
    }

    #[test]
    fn new_round_picks_from_the_question_bank() {
        let mut rng = StepRng::new(0, 0);
        let round = QuizRound::new(7, &mut rng);
        assert_eq!(round.round, 7);
        assert!(QUESTIONS
            .iter()
            .any(|q| std::ptr::eq(q, round.question)));
    }
}

//! Rock-paper-scissors: a single-move solo game against the server.

use super::Turn;
use rand::Rng;

pub const PROMPT: &str = "Let's play rock-paper-scissors!\nWhat is your choice? (need to send: rock or r / paper or p /scissors or s)";

const RETRY: &str = "You sent incorrect value. Please try again.\nWhat is your choice? (need to send: rock or r / paper or p /scissors or s)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Accepts the full word or its one-letter reduction.
    pub fn parse(input: &str) -> Option<Move> {
        match input {
            "rock" | "r" => Some(Move::Rock),
            "paper" | "p" => Some(Move::Paper),
            "scissors" | "s" => Some(Move::Scissors),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    /// Fixed rule table: rock beats scissors, scissors beats paper,
    /// paper beats rock; equal choices tie.
    pub fn outcome_against(self, server: Move) -> &'static str {
        if self == server {
            return "No winner!";
        }
        match (self, server) {
            (Move::Rock, Move::Scissors)
            | (Move::Scissors, Move::Paper)
            | (Move::Paper, Move::Rock) => "You won!",
            _ => "Server won!",
        }
    }
}

/// Resolves one move. Invalid input re-prompts without consuming the
/// session; any valid move is terminal.
pub fn play(input: &str, rng: &mut impl Rng) -> Turn {
    let Some(player) = Move::parse(input) else {
        return Turn {
            reply: RETRY.to_string(),
            finished: false,
        };
    };
    let server = Move::ALL[rng.gen_range(0..Move::ALL.len())];
    Turn {
        reply: format!(
            "Your choice: {}, server choice: {}. {}",
            player.as_str(),
            server.as_str(),
            player.outcome_against(server)
        ),
        finished: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn rule_table_covers_all_nine_combinations() {
        use Move::*;
        let expected = [
            (Rock, Rock, "No winner!"),
            (Rock, Paper, "Server won!"),
            (Rock, Scissors, "You won!"),
            (Paper, Rock, "You won!"),
            (Paper, Paper, "No winner!"),
            (Paper, Scissors, "Server won!"),
            (Scissors, Rock, "Server won!"),
            (Scissors, Paper, "You won!"),
            (Scissors, Scissors, "No winner!"),
        ];
        for (player, server, outcome) in expected {
            assert_eq!(player.outcome_against(server), outcome);
        }
    }

    #[test]
    fn reductions_normalize_to_full_words() {
        assert_eq!(Move::parse("r"), Some(Move::Rock));
        assert_eq!(Move::parse("p"), Some(Move::Paper));
        assert_eq!(Move::parse("s"), Some(Move::Scissors));
        assert_eq!(Move::parse("rock"), Some(Move::Rock));
        assert_eq!(Move::parse("Rock"), None);
        assert_eq!(Move::parse("lizard"), None);
    }

    #[test]
    fn valid_move_finishes_the_session() {
        // StepRng always yields the first option, so the server plays rock.
        let mut rng = StepRng::new(0, 0);
        let turn = play("scissors", &mut rng);
        assert!(turn.finished);
        assert_eq!(
            turn.reply,
            "Your choice: scissors, server choice: rock. Server won!"
        );
    }

    #[test]
    fn invalid_move_reprompts_without_finishing() {
        let mut rng = StepRng::new(0, 0);
        let turn = play("lizard", &mut rng);
        assert!(!turn.finished);
        assert!(turn.reply.starts_with("You sent incorrect value"));
        assert!(turn.reply.contains("What is your choice?"));
    }
}

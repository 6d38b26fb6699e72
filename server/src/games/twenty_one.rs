//! Twenty-one: a solo game of throwing numbers against the server.
//!
//! The player phase accumulates `player_score` until the player stops or
//! busts; the server phase then accumulates `server_score` until it
//! overtakes the player or passes 11, at which point the round resolves.

use super::Turn;
use rand::Rng;

pub const PROMPT: &str = "Let's play 21!\nYou and server will throw numbers from 0 to 10 and calculate them.\nYour goal: score as much as possible, but not more than 21.\nThrowing out for you (need to send: number from 0 to 10 or 'stop')";

const PLAYER_TURN: &str = "Throwing out for you (need to send: number from 0 to 10 or 'stop')";
const SERVER_TURN: &str = "Throwing out for server (need to send: number from 0 to 10)";
const RETRY: &str = "You sent incorrect value. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    ThrowingForPlayer,
    ThrowingForServer,
}

#[derive(Debug)]
pub struct TwentyOne {
    phase: Phase,
    player_score: u32,
    server_score: u32,
}

impl TwentyOne {
    pub fn new() -> Self {
        Self {
            phase: Phase::ThrowingForPlayer,
            player_score: 0,
            server_score: 0,
        }
    }

    /// Server counter-throw. Biased toward busting the player once they
    /// are close to 21; the server's own phase stays uniform.
    fn server_throw(&self, rng: &mut impl Rng) -> u32 {
        match self.phase {
            Phase::ThrowingForPlayer if self.player_score >= 12 => 10,
            _ => rng.gen_range(0..=10),
        }
    }

    pub fn play(&mut self, input: &str, rng: &mut impl Rng) -> Turn {
        if input == "stop" && self.phase == Phase::ThrowingForPlayer {
            self.phase = Phase::ThrowingForServer;
            return Turn {
                reply: SERVER_TURN.to_string(),
                finished: false,
            };
        }
        let Some(thrown) = parse_throw(input) else {
            return Turn {
                reply: RETRY.to_string(),
                finished: false,
            };
        };

        let counter = self.server_throw(rng);
        match self.phase {
            Phase::ThrowingForPlayer => self.player_score += thrown + counter,
            Phase::ThrowingForServer => self.server_score += thrown + counter,
        }

        let mut reply = format!(
            "You thrown {}, server thrown {}. Total: you - {}, server - {}\n",
            thrown, counter, self.player_score, self.server_score
        );
        let finished = match self.phase {
            Phase::ThrowingForPlayer => {
                if self.player_score < 21 {
                    reply.push_str(PLAYER_TURN);
                    false
                } else if self.player_score == 21 {
                    reply.push_str("Wow! BlackJack! You won!");
                    true
                } else {
                    reply.push_str("You took more 21! You lost!");
                    true
                }
            }
            Phase::ThrowingForServer => {
                if self.server_score <= self.player_score && self.server_score <= 11 {
                    reply.push_str(SERVER_TURN);
                    false
                } else if self.server_score > 21 {
                    reply.push_str("Server took more 21! You won!");
                    true
                } else if self.server_score > self.player_score {
                    reply.push_str("Server won!");
                    true
                } else if self.server_score == self.player_score {
                    reply.push_str("No winner!");
                    true
                } else {
                    reply.push_str("You won!");
                    true
                }
            }
        };
        Turn { reply, finished }
    }
}

impl Default for TwentyOne {
    fn default() -> Self {
        Self::new()
    }
}

/// Digits only, value at most 10. Anything else re-prompts.
fn parse_throw(input: &str) -> Option<u32> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse().ok().filter(|value| *value <= 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    // StepRng(0, 0) makes every uniform counter-throw 0; only the
    // deterministic 10-throw at player_score >= 12 adds to the score.
    fn rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn busting_loses_and_finishes() {
        let mut game = TwentyOne::new();
        let mut rng = rng();

        let turn = game.play("5", &mut rng);
        assert!(!turn.finished);
        assert!(turn.reply.contains("Total: you - 5, server - 0"));

        let turn = game.play("10", &mut rng);
        assert!(!turn.finished);
        assert!(turn.reply.contains("Total: you - 15, server - 0"));

        // At 15 the server counters with a deterministic 10: 15 + 7 + 10.
        let turn = game.play("7", &mut rng);
        assert!(turn.finished);
        assert!(turn.reply.contains("You took more 21! You lost!"));
    }

    #[test]
    fn exact_21_is_blackjack() {
        let mut game = TwentyOne::new();
        let mut rng = rng();
        game.play("10", &mut rng);
        game.play("1", &mut rng);
        // 11 + 10 + the uniform 0 counter == 21.
        let turn = game.play("10", &mut rng);
        assert!(turn.finished);
        assert!(turn.reply.contains("Wow! BlackJack! You won!"));
    }

    #[test]
    fn stop_switches_phase_once() {
        let mut game = TwentyOne::new();
        let mut rng = rng();

        let turn = game.play("stop", &mut rng);
        assert!(!turn.finished);
        assert_eq!(turn.reply, SERVER_TURN);

        // "stop" is not accepted in the server phase.
        let turn = game.play("stop", &mut rng);
        assert!(!turn.finished);
        assert_eq!(turn.reply, RETRY);
    }

    #[test]
    fn server_overtaking_player_resolves() {
        let mut game = TwentyOne::new();
        let mut rng = rng();
        game.play("stop", &mut rng);
        // Player stopped at 0, so any server score wins outright.
        let turn = game.play("5", &mut rng);
        assert!(turn.finished);
        assert!(turn.reply.contains("Total: you - 0, server - 5"));
        assert!(turn.reply.contains("Server won!"));
    }

    #[test]
    fn server_phase_continues_below_threshold() {
        let mut game = TwentyOne::new();
        let mut rng = rng();
        game.play("10", &mut rng);
        game.play("stop", &mut rng);

        // server 5 <= player 10 and <= 11: keep throwing.
        let turn = game.play("5", &mut rng);
        assert!(!turn.finished);
        assert!(turn.reply.contains(SERVER_TURN));

        // server 10 == player 10 but still <= 11: keep throwing.
        let turn = game.play("5", &mut rng);
        assert!(!turn.finished);

        // server 15 > player 10: resolve.
        let turn = game.play("5", &mut rng);
        assert!(turn.finished);
        assert!(turn.reply.contains("Server won!"));
    }

    #[test]
    fn equal_scores_give_no_winner() {
        let mut game = TwentyOne::new();
        let mut rng = rng();
        game.play("10", &mut rng);
        game.play("stop", &mut rng);
        game.play("10", &mut rng); // server 10 == player 10, continues
        let turn = game.play("3", &mut rng); // server 13 > 11, > player? no: 13 > 10
        assert!(turn.finished);
        assert!(turn.reply.contains("Server won!"));

        // A genuine tie: player 12, server reaches exactly 12.
        let mut game = TwentyOne::new();
        game.play("10", &mut rng);
        game.play("2", &mut rng);
        game.play("stop", &mut rng);
        game.play("10", &mut rng); // server 10 <= player 12, continues
        let turn = game.play("2", &mut rng); // server 12 > 11, == player
        assert!(turn.finished);
        assert!(turn.reply.contains("No winner!"));
    }

    #[test]
    fn malformed_input_never_advances_state() {
        let mut game = TwentyOne::new();
        let mut rng = rng();
        for bad in ["eleven", "11", "-3", "1.5", "10 ", ""] {
            let turn = game.play(bad, &mut rng);
            assert!(!turn.finished);
            assert_eq!(turn.reply, RETRY);
        }
        // Scores untouched by the rejected inputs.
        let turn = game.play("0", &mut rng);
        assert!(turn.reply.contains("Total: you - 0, server - 0"));
    }
}

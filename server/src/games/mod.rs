//! Turn-based mini-games hosted by the chat server.
//!
//! Solo games are scoped to one connection and dispatched through the
//! [`SoloGame`] tag; the quiz is a process-wide shared session driven by
//! [`quiz::QuizRound`]. All machines are pure: they consume a line of
//! input plus a random source and return reply text, so they are tested
//! without any sockets.

pub mod quiz;
pub mod rock_paper_scissors;
pub mod twenty_one;

use rand::Rng;
use twenty_one::TwentyOne;

/// Active solo game session for a single connection.
///
/// At most one exists per connection: the router consumes every line of
/// a connection with an active session, so a second game cannot be
/// started underneath it.
#[derive(Debug)]
pub enum SoloGame {
    RockPaperScissors,
    TwentyOne(TwentyOne),
}

/// Result of feeding one line into a solo game.
#[derive(Debug)]
pub struct Turn {
    /// Text sent back to the player as a private message.
    pub reply: String,
    /// True once the game reached a terminal outcome and the session
    /// must be destroyed.
    pub finished: bool,
}

impl SoloGame {
    /// Rules/entry prompt sent when the session is created.
    pub fn prompt(&self) -> &'static str {
        match self {
            SoloGame::RockPaperScissors => rock_paper_scissors::PROMPT,
            SoloGame::TwentyOne(_) => twenty_one::PROMPT,
        }
    }

    pub fn play(&mut self, input: &str, rng: &mut impl Rng) -> Turn {
        match self {
            SoloGame::RockPaperScissors => rock_paper_scissors::play(input, rng),
            SoloGame::TwentyOne(game) => game.play(input, rng),
        }
    }
}

//! Line routing and server command dispatch.
//!
//! Priority order: an active shared game captures everything, then the
//! sender's solo game, then the `"[recipient] body"` prefix decides
//! between command dispatch, private delivery and public broadcast.
//! Every failure path answers the offending sender; nothing in here can
//! evict a connection.

use crate::games::twenty_one::TwentyOne;
use crate::games::SoloGame;
use crate::registry::ConnId;
use crate::server::ServerState;
use log::{info, warn};
use shared::{split_recipient, SERVER_NAME};

const HELP: &str = "To send a public message: just send any text.\n\
To send private message: [<username>] <your message>\n\
To send message to server: [server] command\n\
Server supports the following commands:\n\
[server] help - info about chat\n\
[server] participants - return list of chat participants\n\
[server] participants-count - return count of chat participants\n\
[server] rock-paper-scissors - play rock-paper-scissors game with server\n\
[server] 21 - play 21 game with server\n\
[server] quiz - quiz game for all participants";

/// Routes one line from a registered connection.
pub fn route(state: &mut ServerState, id: ConnId, line: &str) {
    // A shared game consumes every line, even plain chat text.
    if state.quiz.is_some() {
        handle_quiz_answer(state, id, line);
        return;
    }
    if state.solo_games.contains_key(&id) {
        handle_solo_input(state, id, line);
        return;
    }

    let sender = match state.registry.get(id) {
        Some(conn) => conn.name.clone(),
        None => {
            warn!("Dropping line from unknown connection {}", id);
            return;
        }
    };
    match split_recipient(line) {
        (None, text) => {
            state
                .registry
                .broadcast(&format!("[{}] {}", sender, text), Some(id), None);
        }
        (Some(recipient), body) => {
            info!("[{}] -> [{}] {}", sender, recipient, body);
            if recipient == SERVER_NAME {
                dispatch_command(state, id, body);
            } else if let Some(target) = state.registry.lookup_by_name(recipient) {
                state.registry.private_message(&sender, target, body);
            } else {
                state
                    .registry
                    .send_to_one(id, "Unknown recipient. Please try again.");
            }
        }
    }
}

fn handle_quiz_answer(state: &mut ServerState, id: ConnId, line: &str) {
    let name = match state.registry.get(id) {
        Some(conn) => conn.name.clone(),
        None => return,
    };
    if let Some(quiz) = state.quiz.as_mut() {
        quiz.submit(&name, line);
    }
}

fn handle_solo_input(state: &mut ServerState, id: ConnId, line: &str) {
    let turn = match state.solo_games.get_mut(&id) {
        Some(game) => game.play(line, &mut rand::thread_rng()),
        None => return,
    };
    if turn.finished {
        state.solo_games.remove(&id);
    }
    state.reply_from_server(id, &turn.reply);
}

/// `[server] <command>` bodies, matched as case-sensitive literals.
fn dispatch_command(state: &mut ServerState, id: ConnId, cmd: &str) {
    match cmd {
        "help" => state.reply_from_server(id, HELP),
        "participants" => {
            let list = state.registry.participants().join(", ");
            state.reply_from_server(id, &format!("List of participants: {}", list));
        }
        "participants-count" => {
            let count = state.registry.participants().len();
            state.reply_from_server(id, &format!("Participants count: {}", count));
        }
        "rock-paper-scissors" => start_solo(state, id, SoloGame::RockPaperScissors),
        "21" => start_solo(state, id, SoloGame::TwentyOne(TwentyOne::new())),
        "quiz" => start_quiz(state),
        _ => state.reply_from_server(id, "Unknown command"),
    }
}

fn start_solo(state: &mut ServerState, id: ConnId, game: SoloGame) {
    state.reply_from_server(id, game.prompt());
    state.solo_games.insert(id, game);
}

fn start_quiz(state: &mut ServerState) {
    state.quiz_round += 1;
    let round = state.quiz_round;
    let quiz = crate::games::quiz::QuizRound::new(round, &mut rand::thread_rng());
    state.registry.broadcast(&quiz.intro(), None, None);
    state.quiz = Some(quiz);
    state.arm_quiz_deadline(round);
}

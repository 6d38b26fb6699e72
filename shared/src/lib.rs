//! Protocol constants and line-format helpers shared by the chat server
//! and the terminal client.
//!
//! The wire format is newline-delimited UTF-8 text: one logical message
//! per line, no framing beyond the `\n` delimiter. Reads are capped at
//! [`BUFFER_SIZE`] bytes per call, so both sides must tolerate partial
//! and merged lines.

/// Maximum number of bytes consumed per read call.
pub const BUFFER_SIZE: usize = 2048;

/// Port used when none is given on the command line.
pub const DEFAULT_PORT: u16 = 8888;

/// Listen backlog for the server socket.
pub const LISTEN_BACKLOG: u32 = 100;

/// Reserved sender/recipient name for the server itself. Never
/// assignable as a user name; `[server] <command>` addresses command
/// dispatch.
pub const SERVER_NAME: &str = "server";

/// First thing a freshly accepted connection receives.
pub const GREETING: &str = "Hi! You are trying to connect to chat room.\nWhat is your name?";

/// Splits a chat line with an optional `"[recipient] body"` prefix.
///
/// The prefix is present only if the line starts with `[` and contains
/// a closing `]`. Recipient and body are trimmed; the body may be
/// empty. Lines without a prefix are returned whole as the body.
pub fn split_recipient(line: &str) -> (Option<&str>, &str) {
    if let Some(rest) = line.strip_prefix('[') {
        if let Some(pos) = rest.find(']') {
            return (Some(rest[..pos].trim()), rest[pos + 1..].trim());
        }
    }
    (None, line)
}

//! SMTP reply line parser.

use crate::error::{Error, Result};
use crate::types::{Reply, ReplyCode};

/// Parses one SMTP reply line (without its CRLF).
///
/// The first three characters, trimmed, are the numeric code; the rest,
/// trimmed, is the text. Multi-line replies keep the separator, so
/// `250-PIPELINING` parses to code 250 and text `-PIPELINING`.
///
/// # Errors
///
/// Returns an error if the line does not start with a numeric code.
pub fn parse_reply(line: &str) -> Result<Reply> {
    let split = line.char_indices().nth(3).map_or(line.len(), |(index, _)| index);
    let (code_str, rest) = line.split_at(split);

    let code = code_str
        .trim()
        .parse::<u16>()
        .map_err(|_| Error::Protocol(format!("Invalid reply code: {line:?}")))?;

    Ok(Reply::new(ReplyCode::new(code), rest.trim()))
}

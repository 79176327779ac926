// src/commands/helpers.rs

//! Shared argument extraction and the clause parsers used by more than one
//! command grammar.

use crate::errors::ZSetError;
use crate::protocol::RespValue;
use crate::score::{format_score, parse_score};
use crate::storage::{Aggregate, SortedSet};
use bytes::Bytes;

/// Extracts a UTF-8 string from raw argument bytes. Keywords and numeric
/// literals must be valid UTF-8; member and key bytes are opaque and never
/// pass through here.
pub fn extract_string(arg: &Bytes) -> Result<String, ZSetError> {
    String::from_utf8(arg.to_vec()).map_err(|_| ZSetError::SyntaxError)
}

/// Case-insensitive keyword comparison on raw argument bytes.
pub fn is_keyword(arg: &Bytes, keyword: &str) -> bool {
    arg.eq_ignore_ascii_case(keyword.as_bytes())
}

pub fn parse_int(arg: &Bytes) -> Result<i64, ZSetError> {
    std::str::from_utf8(arg)
        .map_err(|_| ZSetError::NotAnInteger)?
        .parse::<i64>()
        .map_err(|_| ZSetError::NotAnInteger)
}

pub fn parse_positive_count(arg: &Bytes) -> Result<i64, ZSetError> {
    let count = std::str::from_utf8(arg)
        .map_err(|_| ZSetError::InvalidCount)?
        .parse::<i64>()
        .map_err(|_| ZSetError::InvalidCount)?;
    if count <= 0 {
        return Err(ZSetError::InvalidCount);
    }
    Ok(count)
}

/// Index of the first clause keyword (`WEIGHTS`, `AGGREGATE`, `WITHSCORES`)
/// in an argument slice; everything before it is the key list.
pub fn clause_boundary(args: &[Bytes]) -> Option<usize> {
    args.iter().position(|arg| {
        is_keyword(arg, "weights") || is_keyword(arg, "aggregate") || is_keyword(arg, "withscores")
    })
}

/// The parsed form of `key [key ...] [WEIGHTS w ...] [AGGREGATE <SUM|MIN|MAX>]
/// [WITHSCORES]`, shared by the union and intersection command family.
#[derive(Debug, Clone, Default)]
pub struct KeysAndClauses {
    pub keys: Vec<Bytes>,
    /// Empty when `WEIGHTS` was not given (implicit 1.0 per input);
    /// otherwise exactly one weight per key.
    pub weights: Vec<f64>,
    pub aggregate: Aggregate,
    pub withscores: bool,
}

pub fn parse_keys_weights_aggregate(
    args: &[Bytes],
    cmd: &str,
) -> Result<KeysAndClauses, ZSetError> {
    let boundary = clause_boundary(args).unwrap_or(args.len());
    if boundary == 0 {
        return Err(ZSetError::WrongArgumentCount(cmd.to_string()));
    }

    let mut parsed = KeysAndClauses {
        keys: args[..boundary].to_vec(),
        ..Default::default()
    };

    let mut i = boundary;
    while i < args.len() {
        if is_keyword(&args[i], "weights") {
            i += 1;
            if args.len() < i + parsed.keys.len() {
                return Err(ZSetError::SyntaxError);
            }
            parsed.weights = args[i..i + parsed.keys.len()]
                .iter()
                .map(|w| parse_score(w))
                .collect::<Result<_, _>>()?;
            i += parsed.keys.len();
        } else if is_keyword(&args[i], "aggregate") {
            i += 1;
            let mode = args.get(i).ok_or(ZSetError::SyntaxError)?;
            parsed.aggregate = if is_keyword(mode, "sum") {
                Aggregate::Sum
            } else if is_keyword(mode, "min") {
                Aggregate::Min
            } else if is_keyword(mode, "max") {
                Aggregate::Max
            } else {
                return Err(ZSetError::SyntaxError);
            };
            i += 1;
        } else if is_keyword(&args[i], "withscores") {
            parsed.withscores = true;
            i += 1;
        } else {
            return Err(ZSetError::SyntaxError);
        }
    }

    Ok(parsed)
}

/// Encodes a member with its score as the single `"<member> <score>"` bulk
/// string used by the WITHSCORES and pop replies.
pub fn member_with_score(member: &Bytes, score: f64) -> RespValue {
    let score_text = format_score(score);
    let mut buf = Vec::with_capacity(member.len() + 1 + score_text.len());
    buf.extend_from_slice(member);
    buf.push(b' ');
    buf.extend_from_slice(score_text.as_bytes());
    RespValue::BulkString(Bytes::from(buf))
}

/// Renders a result set as an array, as members alone or as
/// member-with-score bulk strings.
pub fn members_reply(set: &SortedSet, withscores: bool) -> RespValue {
    let items = set
        .iter()
        .map(|entry| {
            if withscores {
                member_with_score(&entry.member, entry.score)
            } else {
                RespValue::BulkString(entry.member.clone())
            }
        })
        .collect();
    RespValue::Array(items)
}

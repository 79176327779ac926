// src/commands/zadd.rs

use crate::commands::helpers::is_keyword;
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::score::{format_score, parse_score};
use crate::storage::{Comparison, MemberEntry, SortedSet, UpdatePolicy, ZAddOptions, ZAddResult};
use async_trait::async_trait;
use bytes::Bytes;

/// `ZADD key [NX | XX] [GT | LT] [CH] [INCR] score member [score member ...]`
#[derive(Debug, Clone, Default)]
pub struct Zadd {
    pub key: Bytes,
    pub members: Vec<MemberEntry>,
    pub options: ZAddOptions,
}

impl ParseCommand for Zadd {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() < 3 {
            return Err(ZSetError::WrongArgumentCount("ZADD".to_string()));
        }

        let key = args[0].clone();
        let mut options = ZAddOptions::default();

        // The flag block is a strict prefix over the closed flag vocabulary;
        // the first token outside it starts the score/member pairs. A member
        // that happens to spell a score literal therefore never shifts the
        // boundary.
        let mut i = 1;
        while i < args.len() {
            if is_keyword(&args[i], "nx") {
                if options.policy == UpdatePolicy::OnlyIfExists {
                    return Err(ZSetError::IncompatibleOptions(
                        "XX and NX options are mutually exclusive",
                    ));
                }
                options.policy = UpdatePolicy::OnlyIfAbsent;
            } else if is_keyword(&args[i], "xx") {
                if options.policy == UpdatePolicy::OnlyIfAbsent {
                    return Err(ZSetError::IncompatibleOptions(
                        "XX and NX options are mutually exclusive",
                    ));
                }
                options.policy = UpdatePolicy::OnlyIfExists;
            } else if is_keyword(&args[i], "gt") {
                if options.comparison == Comparison::OnlyIfLess {
                    return Err(ZSetError::IncompatibleOptions(
                        "GT and LT options are mutually exclusive",
                    ));
                }
                options.comparison = Comparison::OnlyIfGreater;
            } else if is_keyword(&args[i], "lt") {
                if options.comparison == Comparison::OnlyIfGreater {
                    return Err(ZSetError::IncompatibleOptions(
                        "GT and LT options are mutually exclusive",
                    ));
                }
                options.comparison = Comparison::OnlyIfLess;
            } else if is_keyword(&args[i], "ch") {
                options.ch = true;
            } else if is_keyword(&args[i], "incr") {
                options.incr = true;
            } else {
                break;
            }
            i += 1;
        }
        options.validate()?;

        let pairs = &args[i..];
        if pairs.is_empty() || pairs.len() % 2 != 0 {
            return Err(ZSetError::SyntaxError);
        }
        let members = pairs
            .chunks_exact(2)
            .map(|chunk| -> Result<MemberEntry, ZSetError> {
                Ok(MemberEntry {
                    score: parse_score(&chunk[0])?,
                    member: chunk[1].clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if options.incr && members.len() != 1 {
            return Err(ZSetError::IncompatibleOptions(
                "INCR option supports a single score/member pair",
            ));
        }

        Ok(Zadd {
            key,
            members,
            options,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Zadd {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        let mut locks = ctx.lock_set();
        if ctx.host.key_exists(&self.key) {
            locks.write(ctx.cancel, &self.key).await?;
        } else {
            locks.create_and_write(ctx.cancel, &self.key).await?;
        }

        // Re-read under the lock; a concurrent writer may have created the
        // key between the existence probe and the lock grant.
        match ctx.host.get_value(&self.key) {
            Some(value) => {
                let mut set = as_sorted_set(Some(value), &self.key)?;
                let result = set.add_or_update(&self.members, &self.options)?;
                ctx.host.set_value(&self.key, DataValue::SortedSet(set))?;
                Ok(match result {
                    ZAddResult::Count(count) => RespValue::Integer(count as i64),
                    ZAddResult::IncrScore(Some(score)) => {
                        RespValue::SimpleString(format_score(score))
                    }
                    ZAddResult::IncrScore(None) => RespValue::legacy_nil(),
                })
            }
            None => {
                // Fresh key: the set is created straight from the parsed
                // pairs; policies only constrain updates to an existing set.
                let set = SortedSet::from_members(self.members.iter().cloned());
                let reply = if self.options.incr {
                    RespValue::SimpleString(format_score(self.members[0].score))
                } else {
                    RespValue::Integer(set.cardinality() as i64)
                };
                ctx.host.set_value(&self.key, DataValue::SortedSet(set))?;
                Ok(reply)
            }
        }
    }
}

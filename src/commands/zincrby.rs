// src/commands/zincrby.rs

use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::score::{format_score, parse_score};
use crate::storage::{MemberEntry, SortedSet, ZAddOptions, ZAddResult};
use async_trait::async_trait;
use bytes::Bytes;

/// `ZINCRBY key increment member`: the INCR path of ZADD with no policy:
/// key and member are created as needed.
#[derive(Debug, Clone, Default)]
pub struct ZIncrBy {
    pub key: Bytes,
    pub increment: f64,
    pub member: Bytes,
}

impl ParseCommand for ZIncrBy {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() != 3 {
            return Err(ZSetError::WrongArgumentCount("ZINCRBY".to_string()));
        }
        Ok(ZIncrBy {
            key: args[0].clone(),
            increment: parse_score(&args[1])?,
            member: args[2].clone(),
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZIncrBy {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        let entry = MemberEntry {
            score: self.increment,
            member: self.member.clone(),
        };
        let options = ZAddOptions {
            incr: true,
            ..Default::default()
        };
        let mut locks = ctx.lock_set();
        if ctx.host.key_exists(&self.key) {
            locks.write(ctx.cancel, &self.key).await?;
        } else {
            locks.create_and_write(ctx.cancel, &self.key).await?;
        }

        match ctx.host.get_value(&self.key) {
            Some(value) => {
                let mut set = as_sorted_set(Some(value), &self.key)?;
                let result = set.add_or_update(std::slice::from_ref(&entry), &options)?;
                ctx.host.set_value(&self.key, DataValue::SortedSet(set))?;
                Ok(match result {
                    ZAddResult::IncrScore(Some(score)) => {
                        RespValue::SimpleString(format_score(score))
                    }
                    // Unpoliced increments always produce a score.
                    _ => RespValue::legacy_nil(),
                })
            }
            None => {
                let set = SortedSet::from_members([entry]);
                ctx.host.set_value(&self.key, DataValue::SortedSet(set))?;
                Ok(RespValue::SimpleString(format_score(self.increment)))
            }
        }
    }
}

// src/commands/zpop.rs

use crate::commands::helpers::{member_with_score, parse_int};
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::storage::{PopSide, SortedSet};
use async_trait::async_trait;
use bytes::Bytes;

/// Shared logic of `ZPOPMIN key [count]` and `ZPOPMAX key [count]`.
#[derive(Debug, Clone, Default)]
pub struct ZPop {
    pub key: Bytes,
    pub count: i64,
    side: PopSide,
}

impl ZPop {
    fn parse_with_side(args: &[Bytes], side: PopSide, cmd: &str) -> Result<Self, ZSetError> {
        if args.is_empty() || args.len() > 2 {
            return Err(ZSetError::WrongArgumentCount(cmd.to_string()));
        }
        let count = match args.get(1) {
            Some(raw) => parse_int(raw)?,
            None => 1,
        };
        Ok(ZPop {
            key: args[0].clone(),
            count,
            side,
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZPop {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::legacy_nil());
        }
        let mut locks = ctx.lock_set();
        locks.write(ctx.cancel, &self.key).await?;
        let mut set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;

        let popped = set.pop(self.count, self.side)?;
        ctx.host.set_value(&self.key, DataValue::SortedSet(set))?;
        Ok(pop_reply(&popped))
    }
}

/// Popped members with their scores, in (score, member) order.
pub(super) fn pop_reply(popped: &SortedSet) -> RespValue {
    let items = popped
        .iter()
        .map(|entry| member_with_score(&entry.member, entry.score))
        .collect();
    RespValue::Array(items)
}

/// `ZPOPMIN key [count]`
#[derive(Debug, Clone, Default)]
pub struct ZPopMin {
    pub pop: ZPop,
}

impl ParseCommand for ZPopMin {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        Ok(ZPopMin {
            pop: ZPop::parse_with_side(args, PopSide::Min, "ZPOPMIN")?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZPopMin {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        self.pop.execute(ctx).await
    }
}

/// `ZPOPMAX key [count]`
#[derive(Debug, Clone, Default)]
pub struct ZPopMax {
    pub pop: ZPop,
}

impl ParseCommand for ZPopMax {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        Ok(ZPopMax {
            pop: ZPop::parse_with_side(args, PopSide::Max, "ZPOPMAX")?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZPopMax {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        self.pop.execute(ctx).await
    }
}

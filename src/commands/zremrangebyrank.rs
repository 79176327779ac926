// src/commands/zremrangebyrank.rs

use crate::commands::helpers::parse_int;
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZREMRANGEBYRANK key start stop`: removes members by 0-based rank.
/// Negative indices count from the end; a start greater than stop is
/// treated as a reversed inclusive range.
#[derive(Debug, Clone, Default)]
pub struct ZRemRangeByRank {
    pub key: Bytes,
    pub start: i64,
    pub stop: i64,
}

impl ParseCommand for ZRemRangeByRank {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() != 3 {
            return Err(ZSetError::WrongArgumentCount("ZREMRANGEBYRANK".to_string()));
        }
        Ok(ZRemRangeByRank {
            key: args[0].clone(),
            start: parse_int(&args[1])?,
            stop: parse_int(&args[2])?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZRemRangeByRank {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::Null);
        }
        let mut locks = ctx.lock_set();
        locks.write(ctx.cancel, &self.key).await?;
        let mut set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;

        let cardinality = set.cardinality() as i64;
        let mut start = self.start;
        let mut stop = self.stop;
        if start < 0 {
            start += cardinality;
        }
        if stop < 0 {
            stop += cardinality;
        }
        if start < 0 || start > cardinality - 1 || stop < 0 || stop > cardinality - 1 {
            return Err(ZSetError::IndexOutOfBounds);
        }

        let (low, high) = if start <= stop {
            (start as usize, stop as usize)
        } else {
            (stop as usize, start as usize)
        };
        let entries = set.entries();
        let mut removed = 0;
        for entry in &entries[low..=high] {
            set.remove(&entry.member);
            removed += 1;
        }
        ctx.host.set_value(&self.key, DataValue::SortedSet(set))?;
        Ok(RespValue::Integer(removed))
    }
}

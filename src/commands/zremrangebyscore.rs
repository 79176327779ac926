// src/commands/zremrangebyscore.rs

use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::score::parse_score;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZREMRANGEBYSCORE key min max`: removes members with a score in
/// `[min, max]`, both ends inclusive.
#[derive(Debug, Clone, Default)]
pub struct ZRemRangeByScore {
    pub key: Bytes,
    pub min: f64,
    pub max: f64,
}

impl ParseCommand for ZRemRangeByScore {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() != 3 {
            return Err(ZSetError::WrongArgumentCount(
                "ZREMRANGEBYSCORE".to_string(),
            ));
        }
        Ok(ZRemRangeByScore {
            key: args[0].clone(),
            min: parse_score(&args[1])?,
            max: parse_score(&args[2])?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZRemRangeByScore {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::Null);
        }
        let mut locks = ctx.lock_set();
        locks.write(ctx.cancel, &self.key).await?;
        let mut set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;

        let removed = set.remove_score_range(self.min, self.max);
        ctx.host.set_value(&self.key, DataValue::SortedSet(set))?;
        Ok(RespValue::Integer(removed as i64))
    }
}

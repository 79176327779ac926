// src/commands/zcount.rs

use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::score::parse_score;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZCOUNT key min max`: members with a score in `[min, max]`, both ends
/// inclusive.
#[derive(Debug, Clone, Default)]
pub struct Zcount {
    pub key: Bytes,
    pub min: f64,
    pub max: f64,
}

impl ParseCommand for Zcount {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() != 3 {
            return Err(ZSetError::WrongArgumentCount("ZCOUNT".to_string()));
        }
        Ok(Zcount {
            key: args[0].clone(),
            min: parse_score(&args[1])?,
            max: parse_score(&args[2])?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Zcount {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::Integer(0));
        }
        let mut locks = ctx.lock_set();
        locks.read(ctx.cancel, &self.key).await?;
        let set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;
        Ok(RespValue::Integer(
            set.count_score_range(self.min, self.max) as i64,
        ))
    }
}

// src/commands/zscore.rs

use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::score::format_score;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZSCORE key member`
#[derive(Debug, Clone, Default)]
pub struct Zscore {
    pub key: Bytes,
    pub member: Bytes,
}

impl ParseCommand for Zscore {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() != 2 {
            return Err(ZSetError::WrongArgumentCount("ZSCORE".to_string()));
        }
        Ok(Zscore {
            key: args[0].clone(),
            member: args[1].clone(),
        })
    }
}

#[async_trait]
impl ExecutableCommand for Zscore {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::legacy_nil());
        }
        let mut locks = ctx.lock_set();
        locks.read(ctx.cancel, &self.key).await?;
        let set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;
        Ok(match set.get_score(&self.member) {
            Some(score) => RespValue::SimpleString(format_score(score)),
            None => RespValue::legacy_nil(),
        })
    }
}

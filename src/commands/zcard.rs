// src/commands/zcard.rs

use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZCARD key`
#[derive(Debug, Clone, Default)]
pub struct Zcard {
    pub key: Bytes,
}

impl ParseCommand for Zcard {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() != 1 {
            return Err(ZSetError::WrongArgumentCount("ZCARD".to_string()));
        }
        Ok(Zcard {
            key: args[0].clone(),
        })
    }
}

#[async_trait]
impl ExecutableCommand for Zcard {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        if !ctx.host.key_exists(&self.key) {
            return Ok(RespValue::Integer(0));
        }
        let mut locks = ctx.lock_set();
        locks.read(ctx.cancel, &self.key).await?;
        let set = as_sorted_set(ctx.host.get_value(&self.key), &self.key)?;
        Ok(RespValue::Integer(set.cardinality() as i64))
    }
}

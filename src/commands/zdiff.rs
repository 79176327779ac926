// src/commands/zdiff.rs

use crate::commands::helpers::{is_keyword, members_reply};
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::storage::subtract;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZDIFF key [key ...] [WITHSCORES]`: members of the first set found in
/// none of the others, scores carried over.
#[derive(Debug, Clone, Default)]
pub struct Zdiff {
    pub keys: Vec<Bytes>,
    pub withscores: bool,
}

impl ParseCommand for Zdiff {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() < 2 {
            return Err(ZSetError::WrongArgumentCount("ZDIFF".to_string()));
        }
        // WITHSCORES may not stand in for the first key.
        if is_keyword(&args[0], "withscores") {
            return Err(ZSetError::WrongArgumentCount("ZDIFF".to_string()));
        }
        let keys = args
            .iter()
            .filter(|arg| !is_keyword(arg, "withscores"))
            .cloned()
            .collect();
        let withscores = args.iter().any(|arg| is_keyword(arg, "withscores"));
        Ok(Zdiff { keys, withscores })
    }
}

#[async_trait]
impl ExecutableCommand for Zdiff {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        let mut locks = ctx.lock_set();
        let mut sets = Vec::with_capacity(self.keys.len());
        for key in &self.keys {
            if !ctx.host.key_exists(key) {
                continue;
            }
            locks.read(ctx.cancel, key).await?;
            sets.push(as_sorted_set(ctx.host.get_value(key), key)?);
        }

        let diff = match sets.as_slice() {
            [] => return Ok(RespValue::Array(Vec::new())),
            [single] => single.clone(),
            [base, others @ ..] => subtract(base, others),
        };
        Ok(members_reply(&diff, self.withscores))
    }
}

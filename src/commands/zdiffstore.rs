// src/commands/zdiffstore.rs

use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext, as_sorted_set};
use crate::protocol::RespValue;
use crate::storage::subtract;
use async_trait::async_trait;
use bytes::Bytes;

/// `ZDIFFSTORE destination key [key ...]`
#[derive(Debug, Clone, Default)]
pub struct ZDiffStore {
    pub destination: Bytes,
    pub keys: Vec<Bytes>,
}

impl ParseCommand for ZDiffStore {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.len() < 2 {
            return Err(ZSetError::WrongArgumentCount("ZDIFFSTORE".to_string()));
        }
        Ok(ZDiffStore {
            destination: args[0].clone(),
            keys: args[1..].to_vec(),
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZDiffStore {
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
            [] => {
                return Err(ZSetError::EmptyInput(
                    "not enough sorted sets to calculate difference",
                ));
            }
            [single] => single.clone(),
            [base, others @ ..] => subtract(base, others),
        };

        // Source locks stay held until the result is stored; the destination
        // lock comes last, in write mode.
        if ctx.host.key_exists(&self.destination) {
            locks.write(ctx.cancel, &self.destination).await?;
        } else {
            locks
                .create_and_write(ctx.cancel, &self.destination)
                .await?;
        }
        let cardinality = diff.cardinality() as i64;
        ctx.host
            .set_value(&self.destination, DataValue::SortedSet(diff))?;
        Ok(RespValue::Integer(cardinality))
    }
}

// src/commands/zunionstore.rs

use crate::commands::zinter::collect_weighted_sets;
use crate::commands::zinterstore::parse_store_args;
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext};
use crate::protocol::RespValue;
use crate::storage::{Aggregate, union};
use async_trait::async_trait;
use bytes::Bytes;

/// `ZUNIONSTORE destination key [key ...] [WEIGHTS w ...]
/// [AGGREGATE <SUM|MIN|MAX>]`: WITHSCORES is accepted and ignored.
#[derive(Debug, Clone, Default)]
pub struct ZUnionStore {
    pub destination: Bytes,
    pub keys: Vec<Bytes>,
    pub weights: Vec<f64>,
    pub aggregate: Aggregate,
}

impl ParseCommand for ZUnionStore {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        let (destination, parsed) = parse_store_args(args, "ZUNIONSTORE")?;
        Ok(ZUnionStore {
            destination,
            keys: parsed.keys,
            weights: parsed.weights,
            aggregate: parsed.aggregate,
        })
    }
}

#[async_trait]
impl ExecutableCommand for ZUnionStore {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        let mut locks = ctx.lock_set();
        let (sets, weights) =
            collect_weighted_sets(ctx, &mut locks, &self.keys, &self.weights).await?;

        let result = match sets.as_slice() {
            [] => return Err(ZSetError::EmptyInput("no sorted sets to form union")),
            [single] => single.clone(),
            _ => union(&sets, &weights, self.aggregate),
        };

        if ctx.host.key_exists(&self.destination) {
            locks.write(ctx.cancel, &self.destination).await?;
        } else {
            locks
                .create_and_write(ctx.cancel, &self.destination)
                .await?;
        }
        let cardinality = result.cardinality() as i64;
        ctx.host
            .set_value(&self.destination, DataValue::SortedSet(result))?;
        Ok(RespValue::Integer(cardinality))
    }
}

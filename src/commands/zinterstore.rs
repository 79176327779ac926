// src/commands/zinterstore.rs

use crate::commands::helpers::{clause_boundary, parse_keys_weights_aggregate};
use crate::commands::zinter::collect_weighted_sets;
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::{DataValue, ExecutionContext};
use crate::protocol::RespValue;
use crate::storage::{Aggregate, intersect};
use async_trait::async_trait;
use bytes::Bytes;

/// `ZINTERSTORE destination key [key ...] [WEIGHTS w ...]
/// [AGGREGATE <SUM|MIN|MAX>]`: WITHSCORES is accepted and ignored.
#[derive(Debug, Clone, Default)]
pub struct ZInterStore {
    pub destination: Bytes,
    pub keys: Vec<Bytes>,
    pub weights: Vec<f64>,
    pub aggregate: Aggregate,
}

impl ParseCommand for ZInterStore {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        let (destination, parsed) = parse_store_args(args, "ZINTERSTORE")?;
        Ok(ZInterStore {
            destination,
            keys: parsed.keys,
            weights: parsed.weights,
            aggregate: parsed.aggregate,
        })
    }
}

/// Shared grammar of the storing set-algebra forms: the destination comes
/// first and is removed from the key list before clause extraction.
pub(super) fn parse_store_args(
    args: &[Bytes],
    cmd: &str,
) -> Result<(Bytes, crate::commands::helpers::KeysAndClauses), ZSetError> {
    if args.len() < 2 {
        return Err(ZSetError::WrongArgumentCount(cmd.to_string()));
    }
    let destination = args[0].clone();

    let rest = &args[1..];
    let boundary = clause_boundary(rest).unwrap_or(rest.len());
    let mut filtered: Vec<Bytes> = rest[..boundary]
        .iter()
        .filter(|key| **key != destination)
        .cloned()
        .collect();
    filtered.extend_from_slice(&rest[boundary..]);

    let parsed = parse_keys_weights_aggregate(&filtered, cmd)?;
    Ok((destination, parsed))
}

#[async_trait]
impl ExecutableCommand for ZInterStore {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        let mut locks = ctx.lock_set();
        let (sets, weights) =
            collect_weighted_sets(ctx, &mut locks, &self.keys, &self.weights).await?;

        let result = match sets.as_slice() {
            [] => {
                return Err(ZSetError::EmptyInput("not enough sets to form an intersect"));
            }
            [single] => single.clone(),
            _ => intersect(&sets, &weights, self.aggregate),
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

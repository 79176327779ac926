// src/commands/zunion.rs

use crate::commands::helpers::{members_reply, parse_keys_weights_aggregate};
use crate::commands::zinter::collect_weighted_sets;
use crate::commands::{ExecutableCommand, ParseCommand};
use crate::errors::ZSetError;
use crate::keyspace::ExecutionContext;
use crate::protocol::RespValue;
use crate::storage::{Aggregate, union};
use async_trait::async_trait;
use bytes::Bytes;

/// `ZUNION key [key ...] [WEIGHTS w ...] [AGGREGATE <SUM|MIN|MAX>]
/// [WITHSCORES]`
#[derive(Debug, Clone, Default)]
pub struct Zunion {
    pub keys: Vec<Bytes>,
    pub weights: Vec<f64>,
    pub aggregate: Aggregate,
    pub withscores: bool,
}

impl ParseCommand for Zunion {
    fn parse(args: &[Bytes]) -> Result<Self, ZSetError> {
        if args.is_empty() {
            return Err(ZSetError::WrongArgumentCount("ZUNION".to_string()));
        }
        let parsed = parse_keys_weights_aggregate(args, "ZUNION")?;
        Ok(Zunion {
            keys: parsed.keys,
            weights: parsed.weights,
            aggregate: parsed.aggregate,
            withscores: parsed.withscores,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Zunion {
    async fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<RespValue, ZSetError> {
        let mut locks = ctx.lock_set();
        let (sets, weights) =
            collect_weighted_sets(ctx, &mut locks, &self.keys, &self.weights).await?;

        let result = match sets.as_slice() {
            [] => return Err(ZSetError::EmptyInput("no sorted sets to form union")),
            [single] => single.clone(),
            _ => union(&sets, &weights, self.aggregate),
        };
        Ok(members_reply(&result, self.withscores))
    }
}

// src/commands/registry.rs

//! The command descriptor table.
//!
//! Each descriptor names a command, its category tags, whether it mutates
//! (and therefore needs replication hooks), and a key-extraction function
//! over the raw argument vector. Extraction mirrors the handler's actual key
//! selection so that external sharding and ACL layers see the same key set
//! the handler will lock.

use crate::commands::helpers::{clause_boundary, is_keyword};
use crate::errors::ZSetError;
use bytes::Bytes;

pub type KeyExtractor = fn(&[Bytes]) -> Result<Vec<Bytes>, ZSetError>;

pub struct CommandDescriptor {
    pub name: &'static str,
    pub categories: &'static [&'static str],
    /// Mutating commands require replication/journal hooks.
    pub sync: bool,
    /// Keys the command will touch, from the full argument vector
    /// (command name at index 0).
    pub key_extractor: KeyExtractor,
    pub description: &'static str,
}

const SORTED_SET: &str = "sorted-set";
const READ: &str = "read";
const WRITE: &str = "write";
const FAST: &str = "fast";

pub const COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "zadd",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zadd_keys,
        description: "(ZADD key [NX | XX] [GT | LT] [CH] [INCR] score member [score member ...]) \
Adds all the specified members with the specified scores to the sorted set at the key",
    },
    CommandDescriptor {
        name: "zcard",
        categories: &[SORTED_SET, READ, FAST],
        sync: false,
        key_extractor: zcard_keys,
        description: "(ZCARD key) Returns the cardinality of the sorted set at key",
    },
    CommandDescriptor {
        name: "zcount",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: zcount_keys,
        description: "(ZCOUNT key min max) \
Returns the number of members in the sorted set with scores in the range of min and max",
    },
    CommandDescriptor {
        name: "zdiff",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: zdiff_keys,
        description: "(ZDIFF key [key ...] [WITHSCORES]) \
Computes the difference between the listed sorted sets and returns the result",
    },
    CommandDescriptor {
        name: "zdiffstore",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zdiffstore_keys,
        description: "(ZDIFFSTORE destination key [key ...]) \
Computes the difference between the listed sorted sets and stores it in destination",
    },
    CommandDescriptor {
        name: "zincrby",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zincrby_keys,
        description: "(ZINCRBY key increment member) \
Increments the member's score by the increment, creating key and member as needed",
    },
    CommandDescriptor {
        name: "zinter",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: algebra_keys,
        description: "(ZINTER key [key ...] [WEIGHTS weight [weight ...]] \
[AGGREGATE <SUM | MIN | MAX>] [WITHSCORES]) \
Computes the intersection of the sets at the keys with weights, aggregate and scores",
    },
    CommandDescriptor {
        name: "zinterstore",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: algebra_store_keys,
        description: "(ZINTERSTORE destination key [key ...] [WEIGHTS weight [weight ...]] \
[AGGREGATE <SUM | MIN | MAX>]) \
Computes the intersection of the sets at the keys and stores it in destination",
    },
    CommandDescriptor {
        name: "zmpop",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zmpop_keys,
        description: "(ZMPOP key [key ...] <MIN | MAX> [COUNT count]) \
Pops count members from the first non-empty sorted set in the key list",
    },
    CommandDescriptor {
        name: "zmscore",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: zmscore_keys,
        description: "(ZMSCORE key member [member ...]) \
Returns the scores of the specified members, nil for members not in the set",
    },
    CommandDescriptor {
        name: "zpopmax",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zpop_keys,
        description: "(ZPOPMAX key [count]) \
Removes and returns count members with the highest scores. Default count is 1",
    },
    CommandDescriptor {
        name: "zpopmin",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zpop_keys,
        description: "(ZPOPMIN key [count]) \
Removes and returns count members with the lowest scores. Default count is 1",
    },
    CommandDescriptor {
        name: "zrandmember",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: no_keys,
        description: "(ZRANDMEMBER key [count [WITHSCORES]]) \
Returns random members of the sorted set",
    },
    CommandDescriptor {
        name: "zrank",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: zrank_keys,
        description: "(ZRANK key member [WITHSCORE]) \
Returns the ascending rank of the member, with WITHSCORE also its score",
    },
    CommandDescriptor {
        name: "zrevrank",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: zrank_keys,
        description: "(ZREVRANK key member [WITHSCORE]) \
Returns the descending rank of the member, with WITHSCORE also its score",
    },
    CommandDescriptor {
        name: "zrem",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zrem_keys,
        description: "(ZREM key member [member ...]) Removes the listed members from the sorted set",
    },
    CommandDescriptor {
        name: "zscore",
        categories: &[SORTED_SET, READ, FAST],
        sync: false,
        key_extractor: zscore_keys,
        description: "(ZSCORE key member) Returns the score of the member in the sorted set",
    },
    CommandDescriptor {
        name: "zremrangebylex",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zremrangebylex_keys,
        description: "(ZREMRANGEBYLEX key min max) \
Removes members in a lexicographic range from a single-score sorted set",
    },
    CommandDescriptor {
        name: "zremrangebyrank",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zremrangebyrank_keys,
        description: "(ZREMRANGEBYRANK key start stop) Removes members in a rank range",
    },
    CommandDescriptor {
        name: "zremrangebyscore",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: zremrangebyscore_keys,
        description: "(ZREMRANGEBYSCORE key min max) Removes members in an inclusive score range",
    },
    CommandDescriptor {
        name: "zlexcount",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: no_keys,
        description: "(ZLEXCOUNT key min max) Counts members in a lexicographic range",
    },
    CommandDescriptor {
        name: "zrange",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: no_keys,
        description: "(ZRANGE key start stop) Returns members in an index range",
    },
    CommandDescriptor {
        name: "zrangebylex",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: no_keys,
        description: "(ZRANGEBYLEX key min max) Returns members in a lexicographic range",
    },
    CommandDescriptor {
        name: "zrangebyscore",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: no_keys,
        description: "(ZRANGEBYSCORE key min max) Returns members in a score range",
    },
    CommandDescriptor {
        name: "zrangestore",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: no_keys,
        description: "(ZRANGESTORE destination key start stop) Stores a range of members in destination",
    },
    CommandDescriptor {
        name: "zunion",
        categories: &[SORTED_SET, READ],
        sync: false,
        key_extractor: algebra_keys,
        description: "(ZUNION key [key ...] [WEIGHTS weight [weight ...]] \
[AGGREGATE <SUM | MIN | MAX>] [WITHSCORES]) \
Computes the union of the sets at the keys with weights, aggregate and scores",
    },
    CommandDescriptor {
        name: "zunionstore",
        categories: &[SORTED_SET, WRITE],
        sync: true,
        key_extractor: algebra_store_keys,
        description: "(ZUNIONSTORE destination key [key ...] [WEIGHTS weight [weight ...]] \
[AGGREGATE <SUM | MIN | MAX>]) \
Computes the union of the sets at the keys and stores it in destination",
    },
];

/// Looks a descriptor up by its case-insensitive command name.
pub fn find(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|d| d.name.eq_ignore_ascii_case(name))
}

fn zadd_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 4 {
        return Err(ZSetError::WrongArgumentCount("ZADD".to_string()));
    }
    Ok(vec![args[1].clone()])
}

fn zcard_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() != 2 {
        return Err(ZSetError::WrongArgumentCount("ZCARD".to_string()));
    }
    Ok(vec![args[1].clone()])
}

fn zcount_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() != 4 {
        return Err(ZSetError::WrongArgumentCount("ZCOUNT".to_string()));
    }
    Ok(vec![args[1].clone()])
}

fn zdiff_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 3 {
        return Err(ZSetError::WrongArgumentCount("ZDIFF".to_string()));
    }
    Ok(args[1..]
        .iter()
        .filter(|arg| !is_keyword(arg, "withscores"))
        .cloned()
        .collect())
}

fn zdiffstore_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 3 {
        return Err(ZSetError::WrongArgumentCount("ZDIFFSTORE".to_string()));
    }
    Ok(args[1..].to_vec())
}

fn zincrby_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() != 4 {
        return Err(ZSetError::WrongArgumentCount("ZINCRBY".to_string()));
    }
    Ok(vec![args[1].clone()])
}

/// `ZINTER` / `ZUNION`: the key list ends at the first clause keyword.
fn algebra_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 2 {
        return Err(ZSetError::WrongArgumentCount(name_of(args)));
    }
    let rest = &args[1..];
    let boundary = clause_boundary(rest).unwrap_or(rest.len());
    if boundary == 0 {
        return Err(ZSetError::WrongArgumentCount(name_of(args)));
    }
    Ok(rest[..boundary].to_vec())
}

/// `ZINTERSTORE` / `ZUNIONSTORE`: destination plus the source segment, with
/// repeats of the destination dropped from the sources.
fn algebra_store_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 3 {
        return Err(ZSetError::WrongArgumentCount(name_of(args)));
    }
    let destination = args[1].clone();
    let rest = &args[2..];
    let boundary = clause_boundary(rest).unwrap_or(rest.len());
    if boundary == 0 {
        return Err(ZSetError::WrongArgumentCount(name_of(args)));
    }
    let mut keys = vec![destination.clone()];
    keys.extend(
        rest[..boundary]
            .iter()
            .filter(|key| **key != destination)
            .cloned(),
    );
    Ok(keys)
}

fn zmpop_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 2 {
        return Err(ZSetError::WrongArgumentCount("ZMPOP".to_string()));
    }
    let rest = &args[1..];
    let boundary = rest
        .iter()
        .position(|arg| {
            is_keyword(arg, "min") || is_keyword(arg, "max") || is_keyword(arg, "count")
        })
        .unwrap_or(rest.len());
    if boundary == 0 {
        return Err(ZSetError::WrongArgumentCount("ZMPOP".to_string()));
    }
    Ok(rest[..boundary].to_vec())
}

fn zmscore_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 3 {
        return Err(ZSetError::WrongArgumentCount("ZMSCORE".to_string()));
    }
    Ok(vec![args[1].clone()])
}

fn zpop_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 2 || args.len() > 3 {
        return Err(ZSetError::WrongArgumentCount(name_of(args)));
    }
    Ok(vec![args[1].clone()])
}

fn zrank_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 3 || args.len() > 4 {
        return Err(ZSetError::WrongArgumentCount(name_of(args)));
    }
    Ok(vec![args[1].clone()])
}

fn zrem_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() < 3 {
        return Err(ZSetError::WrongArgumentCount("ZREM".to_string()));
    }
    Ok(vec![args[1].clone()])
}

fn zscore_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() != 3 {
        return Err(ZSetError::WrongArgumentCount("ZSCORE".to_string()));
    }
    Ok(vec![args[1].clone()])
}

fn zremrangebylex_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() != 4 {
        return Err(ZSetError::WrongArgumentCount("ZREMRANGEBYLEX".to_string()));
    }
    Ok(vec![args[1].clone()])
}

fn zremrangebyrank_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() != 4 {
        return Err(ZSetError::WrongArgumentCount("ZREMRANGEBYRANK".to_string()));
    }
    Ok(vec![args[1].clone()])
}

fn zremrangebyscore_keys(args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    if args.len() != 4 {
        return Err(ZSetError::WrongArgumentCount(
            "ZREMRANGEBYSCORE".to_string(),
        ));
    }
    Ok(vec![args[1].clone()])
}

/// The unimplemented commands touch no keys.
fn no_keys(_args: &[Bytes]) -> Result<Vec<Bytes>, ZSetError> {
    Ok(Vec::new())
}

/// Uppercased command name for error messages, taken from the vector itself.
fn name_of(args: &[Bytes]) -> String {
    args.first()
        .map(|name| String::from_utf8_lossy(name).to_ascii_uppercase())
        .unwrap_or_default()
}

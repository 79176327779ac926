// tests/zset_commands_test.rs

//! End-to-end tests for the sorted set command surface, driven through
//! `dispatch` against the mock keyspace host. Responses are asserted as
//! literal wire bytes.

mod common;

use bytes::Bytes;
use citrine_zset::{DataValue, ZSetError};
use common::TestContext;

// ===== ZADD / ZCARD / ZSCORE / ZRANK =====

#[tokio::test]
async fn test_zadd_zcard_zscore_zrank_roundtrip() {
    let ctx = TestContext::new();

    ctx.assert_reply(&["zadd", "s", "1", "a", "2", "b", "3", "c"], b":3\r\n\r\n")
        .await;
    ctx.assert_reply(&["zcard", "s"], b":3\r\n\r\n").await;
    ctx.assert_reply(&["zscore", "s", "b"], b"+2.000000\r\n\r\n")
        .await;
    ctx.assert_reply(&["zrank", "s", "b"], b":1\r\n\r\n").await;
    ctx.assert_reply(&["zrevrank", "s", "b"], b":1\r\n\r\n").await;
}

#[tokio::test]
async fn test_zadd_is_idempotent_for_identical_scores() {
    let ctx = TestContext::new();

    ctx.assert_reply(&["zadd", "s", "1", "a"], b":1\r\n\r\n").await;
    // Same score again: no new member, nothing changed.
    ctx.assert_reply(&["zadd", "s", "1", "a"], b":0\r\n\r\n").await;
    ctx.assert_reply(&["zadd", "s", "ch", "1", "a"], b":0\r\n\r\n")
        .await;
    ctx.assert_reply(&["zcard", "s"], b":1\r\n\r\n").await;
}

#[tokio::test]
async fn test_zadd_ch_counts_changed_members() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "s", "1", "a", "2", "b"]).await;
    // One update, one addition: plain count is 1, CH count is 2.
    ctx.assert_reply(&["zadd", "s", "5", "a", "3", "c"], b":1\r\n\r\n")
        .await;
    ctx.assert_reply(&["zadd", "s", "ch", "6", "a", "4", "d"], b":2\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zadd_xx_gt_blocks_smaller_scores() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "s", "1", "a", "2", "b", "3", "c"]).await;
    ctx.assert_reply(&["zadd", "s", "XX", "GT", "5", "b"], b":0\r\n\r\n")
        .await;
    ctx.assert_reply(&["zscore", "s", "b"], b"+5.000000\r\n\r\n")
        .await;
    ctx.assert_reply(&["zadd", "s", "XX", "GT", "4", "b"], b":0\r\n\r\n")
        .await;
    ctx.assert_reply(&["zscore", "s", "b"], b"+5.000000\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zadd_nx_leaves_existing_members_alone() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "s", "1", "a"]).await;
    ctx.assert_reply(&["zadd", "s", "NX", "9", "a", "2", "b"], b":1\r\n\r\n")
        .await;
    ctx.assert_reply(&["zscore", "s", "a"], b"+1.000000\r\n\r\n")
        .await;
    ctx.assert_reply(&["zscore", "s", "b"], b"+2.000000\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zadd_incr_returns_resulting_score() {
    let ctx = TestContext::new();

    ctx.assert_reply(&["zadd", "inc", "INCR", "5", "m"], b"+5.000000\r\n\r\n")
        .await;
    ctx.assert_reply(&["zadd", "inc", "INCR", "2.5", "m"], b"+7.500000\r\n\r\n")
        .await;
    // NX blocks the increment on an existing member: current score reported.
    ctx.assert_reply(
        &["zadd", "inc", "NX", "INCR", "100", "m"],
        b"+7.500000\r\n\r\n",
    )
    .await;
    // XX on an absent member leaves nothing to report.
    ctx.assert_reply(&["zadd", "inc", "XX", "INCR", "1", "ghost"], b"+(nil)\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zadd_rejects_incompatible_options() {
    let ctx = TestContext::new();

    for parts in [
        &["zadd", "s", "NX", "XX", "1", "a"][..],
        &["zadd", "s", "GT", "LT", "1", "a"][..],
        &["zadd", "s", "NX", "GT", "1", "a"][..],
        &["zadd", "s", "INCR", "1", "a", "2", "b"][..],
    ] {
        assert!(
            matches!(
                ctx.run(parts).await,
                Err(ZSetError::IncompatibleOptions(_))
            ),
            "expected policy error for {parts:?}"
        );
    }
}

#[tokio::test]
async fn test_zadd_rejects_invalid_scores() {
    let ctx = TestContext::new();

    for score in ["abc", "nan", "infinity", "1e999"] {
        assert_eq!(
            ctx.run(&["zadd", "s", score, "a"]).await,
            Err(ZSetError::NotAFloat),
            "score literal {score:?} should be rejected"
        );
    }
    // Odd score/member tail.
    assert_eq!(
        ctx.run(&["zadd", "s", "1", "a", "2"]).await,
        Err(ZSetError::SyntaxError)
    );
    assert!(matches!(
        ctx.run(&["zadd", "s"]).await,
        Err(ZSetError::WrongArgumentCount(_))
    ));
}

#[tokio::test]
async fn test_zadd_member_spelled_like_a_flag() {
    let ctx = TestContext::new();

    // The flag block ends at the first non-flag token, so "nx" here is data.
    ctx.assert_reply(&["zadd", "s", "1", "nx"], b":1\r\n\r\n").await;
    ctx.assert_reply(&["zscore", "s", "nx"], b"+1.000000\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zadd_infinite_scores() {
    let ctx = TestContext::new();

    ctx.assert_reply(&["zadd", "i", "+inf", "a"], b":1\r\n\r\n").await;
    ctx.assert_reply(&["zscore", "i", "a"], b"+inf\r\n\r\n").await;
    ctx.assert_reply(&["zadd", "i", "xx", "-inf", "a"], b":0\r\n\r\n")
        .await;
    ctx.assert_reply(&["zscore", "i", "a"], b"+-inf\r\n\r\n").await;
}

// ===== ZCOUNT =====

#[tokio::test]
async fn test_zcount_inclusive_range() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "zc", "1", "a", "2", "b", "3", "c"]).await;
    ctx.assert_reply(&["zcount", "zc", "2", "3"], b":2\r\n\r\n").await;
    ctx.assert_reply(&["zcount", "zc", "-inf", "+inf"], b":3\r\n\r\n")
        .await;
    ctx.assert_reply(&["zcount", "missing", "0", "1"], b":0\r\n\r\n")
        .await;
    assert_eq!(
        ctx.run(&["zcount", "zc", "one", "2"]).await,
        Err(ZSetError::NotAFloat)
    );
}

// ===== ZSCORE / ZMSCORE =====

#[tokio::test]
async fn test_zscore_nil_for_missing_key_and_member() {
    let ctx = TestContext::new();

    ctx.assert_reply(&["zscore", "missing", "a"], b"+(nil)\r\n\r\n")
        .await;
    ctx.run_ok(&["zadd", "s", "1", "a"]).await;
    ctx.assert_reply(&["zscore", "s", "ghost"], b"+(nil)\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zmscore_mixed_members() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "m", "1", "a", "2", "b"]).await;
    ctx.assert_reply(
        &["zmscore", "m", "a", "x", "b"],
        b"*3\r\n+1.000000\r\n+(nil)\r\n+2.000000\r\n\r\n",
    )
    .await;
    ctx.assert_reply(&["zmscore", "missing", "a"], b"*0\r\n\r\n").await;
}

// ===== ZRANK / ZREVRANK =====

#[tokio::test]
async fn test_zrank_withscore_and_nil_paths() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "s", "1", "a", "2", "b", "3", "c"]).await;
    ctx.assert_reply(
        &["zrank", "s", "b", "WITHSCORE"],
        b"*2\r\n:1\r\n$8\r\n2.000000\r\n\r\n",
    )
    .await;
    ctx.assert_reply(
        &["zrevrank", "s", "c", "WITHSCORE"],
        b"*2\r\n:0\r\n$8\r\n3.000000\r\n\r\n",
    )
    .await;
    ctx.assert_reply(&["zrank", "s", "ghost"], b"_\r\n\r\n").await;
    ctx.assert_reply(&["zrank", "missing", "a"], b"_\r\n\r\n").await;
    assert_eq!(
        ctx.run(&["zrank", "s", "b", "bogus"]).await,
        Err(ZSetError::SyntaxError)
    );
}

// ===== ZREM =====

#[tokio::test]
async fn test_zrem_removes_and_reports_count() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "s", "1", "a", "2", "b"]).await;
    ctx.assert_reply(&["zrem", "s", "a", "ghost"], b":1\r\n\r\n").await;
    ctx.assert_reply(&["zscore", "s", "a"], b"+(nil)\r\n\r\n").await;
    ctx.assert_reply(&["zcard", "s"], b":1\r\n\r\n").await;
    ctx.assert_reply(&["zrem", "missing", "a"], b":0\r\n\r\n").await;
}

// ===== ZINCRBY =====

#[tokio::test]
async fn test_zincrby_creates_and_accumulates() {
    let ctx = TestContext::new();

    ctx.assert_reply(&["zincrby", "zi", "3", "m"], b"+3.000000\r\n\r\n")
        .await;
    ctx.assert_reply(&["zincrby", "zi", "2", "m"], b"+5.000000\r\n\r\n")
        .await;
    ctx.assert_reply(&["zincrby", "zi", "-10", "m"], b"+-5.000000\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zincrby_nan_increment_is_an_error() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zincrby", "zi", "+inf", "m"]).await;
    assert_eq!(
        ctx.run(&["zincrby", "zi", "-inf", "m"]).await,
        Err(ZSetError::NanScore)
    );
    // The member is left unchanged.
    ctx.assert_reply(&["zscore", "zi", "m"], b"+inf\r\n\r\n").await;
}

// ===== ZPOPMIN / ZPOPMAX =====

#[tokio::test]
async fn test_zpopmin_pops_lowest_scores_first() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "p", "1", "a", "2", "b", "3", "c"]).await;
    ctx.assert_reply(
        &["zpopmin", "p", "2"],
        b"*2\r\n$10\r\na 1.000000\r\n$10\r\nb 2.000000\r\n\r\n",
    )
    .await;
    ctx.assert_reply(&["zcard", "p"], b":1\r\n\r\n").await;
    ctx.assert_reply(&["zpopmax", "p"], b"*1\r\n$10\r\nc 3.000000\r\n\r\n")
        .await;
    ctx.assert_reply(&["zpopmin", "p"], b"*0\r\n\r\n").await;
}

#[tokio::test]
async fn test_zpop_on_two_element_set_honors_score_order() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "p2", "1", "low", "2", "high"]).await;
    ctx.assert_reply(&["zpopmin", "p2"], b"*1\r\n$12\r\nlow 1.000000\r\n\r\n")
        .await;
    ctx.assert_reply(&["zpopmax", "p2"], b"*1\r\n$13\r\nhigh 2.000000\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zpop_edge_cases() {
    let ctx = TestContext::new();

    ctx.assert_reply(&["zpopmin", "missing"], b"+(nil)\r\n\r\n").await;
    ctx.run_ok(&["zadd", "p", "1", "a"]).await;
    // More than the set holds pops everything.
    ctx.assert_reply(&["zpopmin", "p", "10"], b"*1\r\n$10\r\na 1.000000\r\n\r\n")
        .await;
    ctx.run_ok(&["zadd", "p", "1", "a"]).await;
    assert_eq!(
        ctx.run(&["zpopmin", "p", "0"]).await,
        Err(ZSetError::InvalidCount)
    );
    assert_eq!(
        ctx.run(&["zpopmin", "p", "-3"]).await,
        Err(ZSetError::InvalidCount)
    );
    assert_eq!(
        ctx.run(&["zpopmin", "p", "two"]).await,
        Err(ZSetError::NotAnInteger)
    );
}

// ===== ZMPOP =====

#[tokio::test]
async fn test_zmpop_pops_from_first_eligible_key() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "mp2", "1", "a", "2", "b", "3", "c"]).await;
    ctx.host.put("strkey", DataValue::String(Bytes::from_static(b"x")));

    // Missing and wrong-typed keys are skipped, not errors.
    ctx.assert_reply(
        &["zmpop", "missing", "strkey", "mp2", "MIN"],
        b"*1\r\n$10\r\na 1.000000\r\n\r\n",
    )
    .await;
    ctx.assert_reply(
        &["zmpop", "mp2", "MAX", "COUNT", "2"],
        b"*2\r\n$10\r\nb 2.000000\r\n$10\r\nc 3.000000\r\n\r\n",
    )
    .await;
    ctx.assert_reply(&["zmpop", "missing", "MIN"], b"+(nil)\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zmpop_grammar() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "mp", "1", "a"]).await;
    // MIN or MAX is required.
    assert_eq!(
        ctx.run(&["zmpop", "mp"]).await,
        Err(ZSetError::SyntaxError)
    );
    assert_eq!(
        ctx.run(&["zmpop", "mp", "MIN", "COUNT", "0"]).await,
        Err(ZSetError::InvalidCount)
    );
    assert_eq!(
        ctx.run(&["zmpop", "mp", "MIN", "COUNT"]).await,
        Err(ZSetError::InvalidCount)
    );
    assert!(matches!(
        ctx.run(&["zmpop", "MIN"]).await,
        Err(ZSetError::WrongArgumentCount(_))
    ));
}

// ===== Set algebra commands =====

async fn seed_union_sets(ctx: &TestContext) {
    ctx.run_ok(&["zadd", "s1", "1", "a", "2", "b"]).await;
    ctx.run_ok(&["zadd", "s2", "3", "b", "4", "c"]).await;
}

#[tokio::test]
async fn test_zunionstore_sum_aggregation() {
    let ctx = TestContext::new();
    seed_union_sets(&ctx).await;

    ctx.assert_reply(
        &["zunionstore", "d", "s1", "s2", "AGGREGATE", "SUM"],
        b":3\r\n\r\n",
    )
    .await;
    ctx.assert_reply(&["zscore", "d", "b"], b"+5.000000\r\n\r\n").await;
    ctx.assert_reply(&["zscore", "d", "a"], b"+1.000000\r\n\r\n").await;
    ctx.assert_reply(&["zscore", "d", "c"], b"+4.000000\r\n\r\n").await;
}

#[tokio::test]
async fn test_zinterstore_weights_and_max_aggregation() {
    let ctx = TestContext::new();
    seed_union_sets(&ctx).await;

    ctx.assert_reply(
        &[
            "zinterstore", "d", "s1", "s2", "WEIGHTS", "2", "3", "AGGREGATE", "MAX",
        ],
        b":1\r\n\r\n",
    )
    .await;
    ctx.assert_reply(&["zscore", "d", "b"], b"+9.000000\r\n\r\n").await;
}

#[tokio::test]
async fn test_zunionstore_self_union_doubles_scores_under_sum() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "k", "1", "a", "2", "b"]).await;
    ctx.assert_reply(&["zunionstore", "dd", "k", "k"], b":2\r\n\r\n").await;
    ctx.assert_reply(&["zscore", "dd", "a"], b"+2.000000\r\n\r\n").await;
    ctx.assert_reply(&["zscore", "dd", "b"], b"+4.000000\r\n\r\n").await;

    // MIN and MAX leave the original scores.
    ctx.assert_reply(
        &["zinterstore", "di", "k", "k", "AGGREGATE", "MIN"],
        b":2\r\n\r\n",
    )
    .await;
    ctx.assert_reply(&["zscore", "di", "a"], b"+1.000000\r\n\r\n").await;
    ctx.assert_reply(&["zscore", "di", "b"], b"+2.000000\r\n\r\n").await;
}

#[tokio::test]
async fn test_zunion_and_zinter_read_forms() {
    let ctx = TestContext::new();
    seed_union_sets(&ctx).await;

    ctx.assert_reply(&["zinter", "s1", "s2"], b"*1\r\n$1\r\nb\r\n\r\n")
        .await;
    ctx.assert_reply(
        &["zinter", "s1", "s2", "WITHSCORES"],
        b"*1\r\n$10\r\nb 5.000000\r\n\r\n",
    )
    .await;
    // Union in (score, member) order: a=1, c=4, b=5.
    ctx.assert_reply(
        &["zunion", "s1", "s2", "WITHSCORES"],
        b"*3\r\n$10\r\na 1.000000\r\n$10\r\nc 4.000000\r\n$10\r\nb 5.000000\r\n\r\n",
    )
    .await;
    // A single existing input is returned as-is; missing keys are skipped.
    ctx.assert_reply(
        &["zinter", "s1", "missing", "WITHSCORES"],
        b"*2\r\n$10\r\na 1.000000\r\n$10\r\nb 2.000000\r\n\r\n",
    )
    .await;
    assert!(matches!(
        ctx.run(&["zinter", "missing1", "missing2"]).await,
        Err(ZSetError::EmptyInput(_))
    ));
    assert!(matches!(
        ctx.run(&["zunion", "missing1", "missing2"]).await,
        Err(ZSetError::EmptyInput(_))
    ));
}

#[tokio::test]
async fn test_zunion_zero_weight_on_infinite_score() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "w1", "+inf", "a"]).await;
    ctx.run_ok(&["zadd", "w2", "1", "a"]).await;
    // 0 x +inf is NaN, which counts as 0 in aggregation.
    ctx.assert_reply(
        &["zunion", "w1", "w2", "WEIGHTS", "0", "1", "WITHSCORES"],
        b"*1\r\n$10\r\na 1.000000\r\n\r\n",
    )
    .await;
}

#[tokio::test]
async fn test_zdiff_variants() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "d1", "1", "a", "2", "b"]).await;
    ctx.run_ok(&["zadd", "d2", "9", "b"]).await;

    ctx.assert_reply(&["zdiff", "d1", "d1"], b"*0\r\n\r\n").await;
    ctx.assert_reply(&["zdiff", "d1", "d2"], b"*1\r\n$1\r\na\r\n\r\n")
        .await;
    // Diffing against a missing key leaves the base set intact.
    ctx.assert_reply(
        &["zdiff", "d1", "missing", "WITHSCORES"],
        b"*2\r\n$10\r\na 1.000000\r\n$10\r\nb 2.000000\r\n\r\n",
    )
    .await;
    ctx.assert_reply(&["zdiff", "missing1", "missing2"], b"*0\r\n\r\n")
        .await;
    assert!(matches!(
        ctx.run(&["zdiff", "WITHSCORES", "d1"]).await,
        Err(ZSetError::WrongArgumentCount(_))
    ));
}

#[tokio::test]
async fn test_zdiffstore() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "d1", "1", "a", "2", "b"]).await;
    ctx.run_ok(&["zadd", "d2", "9", "b"]).await;

    ctx.assert_reply(&["zdiffstore", "dest", "d1", "d2"], b":1\r\n\r\n")
        .await;
    ctx.assert_reply(&["zscore", "dest", "a"], b"+1.000000\r\n\r\n")
        .await;
    assert!(matches!(
        ctx.run(&["zdiffstore", "dest", "missing1", "missing2"]).await,
        Err(ZSetError::EmptyInput(_))
    ));
}

#[tokio::test]
async fn test_algebra_weight_count_must_match_keys() {
    let ctx = TestContext::new();
    seed_union_sets(&ctx).await;

    assert!(
        ctx.run(&["zunion", "s1", "s2", "WEIGHTS", "2"]).await.is_err(),
        "short weight list must be rejected"
    );
    assert_eq!(
        ctx.run(&["zunion", "s1", "s2", "WEIGHTS", "2", "3", "4"]).await,
        Err(ZSetError::SyntaxError)
    );
}

// ===== ZREMRANGEBY* =====

#[tokio::test]
async fn test_zremrangebyscore() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "r", "1", "a", "2", "b", "3", "c"]).await;
    ctx.assert_reply(&["zremrangebyscore", "r", "1", "2"], b":2\r\n\r\n")
        .await;
    ctx.assert_reply(&["zcard", "r"], b":1\r\n\r\n").await;
    ctx.assert_reply(&["zremrangebyscore", "missing", "0", "1"], b"_\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zremrangebyrank() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "rr", "1", "a", "2", "b", "3", "c"]).await;
    ctx.assert_reply(&["zremrangebyrank", "rr", "0", "1"], b":2\r\n\r\n")
        .await;
    ctx.assert_reply(&["zcard", "rr"], b":1\r\n\r\n").await;

    // Negative indices count from the end.
    ctx.run_ok(&["zadd", "rr2", "1", "a", "2", "b", "3", "c"]).await;
    ctx.assert_reply(&["zremrangebyrank", "rr2", "-2", "-1"], b":2\r\n\r\n")
        .await;
    ctx.assert_reply(&["zscore", "rr2", "a"], b"+1.000000\r\n\r\n")
        .await;

    // A start beyond stop is a reversed inclusive range.
    ctx.run_ok(&["zadd", "rr3", "1", "a", "2", "b", "3", "c"]).await;
    ctx.assert_reply(&["zremrangebyrank", "rr3", "2", "0"], b":3\r\n\r\n")
        .await;

    ctx.run_ok(&["zadd", "rr4", "1", "a"]).await;
    assert_eq!(
        ctx.run(&["zremrangebyrank", "rr4", "0", "5"]).await,
        Err(ZSetError::IndexOutOfBounds)
    );
    ctx.assert_reply(&["zremrangebyrank", "missing", "0", "1"], b"_\r\n\r\n")
        .await;
}

#[tokio::test]
async fn test_zremrangebylex() {
    let ctx = TestContext::new();

    ctx.run_ok(&["zadd", "lx", "0", "a", "0", "b", "0", "c"]).await;
    ctx.assert_reply(&["zremrangebylex", "lx", "[a", "[b"], b":2\r\n\r\n")
        .await;
    ctx.assert_reply(&["zcard", "lx"], b":1\r\n\r\n").await;
    ctx.assert_reply(&["zremrangebylex", "lx", "-", "+"], b":1\r\n\r\n")
        .await;

    // Exclusive bounds.
    ctx.run_ok(&["zadd", "lx2", "0", "a", "0", "b", "0", "c"]).await;
    ctx.assert_reply(&["zremrangebylex", "lx2", "(a", "(c"], b":1\r\n\r\n")
        .await;
    ctx.assert_reply(&["zscore", "lx2", "b"], b"+(nil)\r\n\r\n").await;

    // A mixed-score set answers with the null sentinel.
    ctx.run_ok(&["zadd", "lx3", "1", "a", "2", "b"]).await;
    ctx.assert_reply(&["zremrangebylex", "lx3", "-", "+"], b"_\r\n\r\n")
        .await;
    ctx.assert_reply(&["zcard", "lx3"], b":2\r\n\r\n").await;

    ctx.assert_reply(&["zremrangebylex", "missing", "-", "+"], b"_\r\n\r\n")
        .await;
    assert_eq!(
        ctx.run(&["zremrangebylex", "lx3", "a", "+"]).await,
        Err(ZSetError::SyntaxError)
    );
}

// ===== Type errors, stubs, dispatch =====

#[tokio::test]
async fn test_wrong_type_value() {
    let ctx = TestContext::new();
    ctx.host.put("str", DataValue::String(Bytes::from_static(b"hello")));

    assert!(matches!(
        ctx.run(&["zadd", "str", "1", "a"]).await,
        Err(ZSetError::WrongType(_))
    ));
    assert!(matches!(
        ctx.run(&["zscore", "str", "a"]).await,
        Err(ZSetError::WrongType(_))
    ));
    assert!(matches!(
        ctx.run(&["zcard", "str"]).await,
        Err(ZSetError::WrongType(_))
    ));
}

#[tokio::test]
async fn test_unimplemented_and_unknown_commands() {
    let ctx = TestContext::new();

    assert_eq!(
        ctx.run(&["zrange", "s", "0", "-1"]).await,
        Err(ZSetError::NotImplemented("ZRANGE"))
    );
    assert_eq!(
        ctx.run(&["zrangestore", "d", "s", "0", "-1"]).await,
        Err(ZSetError::NotImplemented("ZRANGESTORE"))
    );
    assert_eq!(
        ctx.run(&["zrandmember", "s"]).await,
        Err(ZSetError::NotImplemented("ZRANDMEMBER"))
    );
    assert_eq!(
        ctx.run(&["zlexcount", "s", "-", "+"]).await,
        Err(ZSetError::NotImplemented("ZLEXCOUNT"))
    );
    assert_eq!(
        ctx.run(&["zrangebylex", "s", "-", "+"]).await,
        Err(ZSetError::NotImplemented("ZRANGEBYLEX"))
    );
    assert_eq!(
        ctx.run(&["zrangebyscore", "s", "0", "1"]).await,
        Err(ZSetError::NotImplemented("ZRANGEBYSCORE"))
    );
    assert_eq!(
        ctx.run(&["zfoo"]).await,
        Err(ZSetError::UnknownCommand("zfoo".to_string()))
    );
    assert!(matches!(
        ctx.run(&[]).await,
        Err(ZSetError::WrongArgumentCount(_))
    ));
}

#[tokio::test]
async fn test_command_names_are_case_insensitive() {
    let ctx = TestContext::new();

    ctx.assert_reply(&["ZADD", "s", "1", "a"], b":1\r\n\r\n").await;
    ctx.assert_reply(&["ZCard", "s"], b":1\r\n\r\n").await;
}

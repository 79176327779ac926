// src/storage/sorted_set.rs

use crate::errors::ZSetError;
use bytes::Bytes;
use std::collections::{BTreeSet, HashMap, btree_set};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single entry in a sorted set: a member and its score.
/// `Ord` sorts by score first, then lexicographically by member bytes, which
/// is the enumeration order of the whole structure.
#[derive(Debug, Clone)]
pub struct MemberEntry {
    pub score: f64,
    pub member: Bytes,
}

impl Ord for MemberEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NaN never enters the structure (parsing rejects it), so the
        // partial ordering over scores is total here.
        self.score
            .partial_cmp(&other.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| self.member.cmp(&other.member))
    }
}

impl PartialOrd for MemberEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MemberEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.member == other.member
    }
}

impl Eq for MemberEntry {}

impl Hash for MemberEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Only the member is hashed; it is the unique identity within a set.
        self.member.hash(state);
    }
}

/// Which end of the ordering a pop removes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PopSide {
    #[default]
    Min,
    Max,
}

/// The `NX` / `XX` update policy of `ZADD`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UpdatePolicy {
    #[default]
    None,
    OnlyIfExists, // XX
    OnlyIfAbsent, // NX
}

/// The `GT` / `LT` comparison rule of `ZADD`: an update to an existing
/// member proceeds only when the new score compares strictly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Comparison {
    #[default]
    None,
    OnlyIfGreater, // GT
    OnlyIfLess,    // LT
}

/// The full option record of one `ZADD` invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZAddOptions {
    pub policy: UpdatePolicy,
    pub comparison: Comparison,
    pub ch: bool,
    pub incr: bool,
}

impl ZAddOptions {
    /// Rejects option combinations that cannot be satisfied together.
    pub fn validate(&self) -> Result<(), ZSetError> {
        if self.policy == UpdatePolicy::OnlyIfAbsent && self.comparison != Comparison::None {
            return Err(ZSetError::IncompatibleOptions(
                "GT, LT, and NX options are mutually exclusive",
            ));
        }
        Ok(())
    }
}

/// What `add_or_update` reports back to the handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZAddResult {
    /// Number of added members, or of added-plus-changed members under `CH`.
    Count(usize),
    /// The resulting score under `INCR`; `None` when the update policy left
    /// an absent member untouched and there is no score to report.
    IncrScore(Option<f64>),
}

/// A bound of a lexicographic range.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexBound {
    Inclusive(Bytes),
    Exclusive(Bytes),
    #[default]
    Min, // "-"
    Max, // "+"
}

impl LexBound {
    /// Parses the `-`, `+`, `[member`, `(member` bound grammar.
    pub fn parse(raw: &[u8]) -> Result<LexBound, ZSetError> {
        match raw {
            b"-" => Ok(LexBound::Min),
            b"+" => Ok(LexBound::Max),
            [b'[', rest @ ..] => Ok(LexBound::Inclusive(Bytes::copy_from_slice(rest))),
            [b'(', rest @ ..] => Ok(LexBound::Exclusive(Bytes::copy_from_slice(rest))),
            _ => Err(ZSetError::SyntaxError),
        }
    }
}

impl fmt::Display for LexBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexBound::Inclusive(b) => write!(f, "[{}", String::from_utf8_lossy(b)),
            LexBound::Exclusive(b) => write!(f, "({}", String::from_utf8_lossy(b)),
            LexBound::Min => write!(f, "-"),
            LexBound::Max => write!(f, "+"),
        }
    }
}

/// A two-sided lexicographic range over member bytes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LexRange {
    pub min: LexBound,
    pub max: LexBound,
}

impl LexRange {
    pub fn contains(&self, member: &[u8]) -> bool {
        let above_min = match &self.min {
            LexBound::Min => true,
            LexBound::Max => false,
            LexBound::Inclusive(b) => member >= b.as_ref(),
            LexBound::Exclusive(b) => member > b.as_ref(),
        };
        let below_max = match &self.max {
            LexBound::Max => true,
            LexBound::Min => false,
            LexBound::Inclusive(b) => member <= b.as_ref(),
            LexBound::Exclusive(b) => member < b.as_ref(),
        };
        above_min && below_max
    }
}

/// The sorted set container.
///
/// A `HashMap` provides O(1) member-to-score lookups and a `BTreeSet` keeps
/// the entries ordered by (score, member) for enumeration, range scans, and
/// pops. The two views are kept consistent by every mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedSet {
    /// Fast member-to-score lookups.
    members: HashMap<Bytes, f64>,
    /// Entries sorted by score, then member.
    sorted: BTreeSet<MemberEntry>,
}

impl SortedSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds a set from score/member pairs; a member repeated in the input
    /// keeps its last score.
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator<Item = MemberEntry>,
    {
        let mut set = SortedSet::new();
        for entry in members {
            set.add(entry.score, entry.member);
        }
        set
    }

    pub fn cardinality(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, MemberEntry> {
        self.sorted.iter()
    }

    /// Snapshot of all entries in (score, member) order.
    pub fn entries(&self) -> Vec<MemberEntry> {
        self.sorted.iter().cloned().collect()
    }

    pub fn get_score(&self, member: &Bytes) -> Option<f64> {
        self.members.get(member).copied()
    }

    pub fn contains_member(&self, member: &Bytes) -> bool {
        self.members.contains_key(member)
    }

    /// 0-based rank of a member in ascending enumeration order.
    pub fn rank(&self, member: &Bytes) -> Option<usize> {
        self.members
            .get(member)
            .and_then(|_| self.sorted.iter().position(|entry| entry.member == *member))
    }

    /// 0-based rank of a member in descending enumeration order.
    pub fn rev_rank(&self, member: &Bytes) -> Option<usize> {
        self.members.get(member).and_then(|_| {
            self.sorted
                .iter()
                .rev()
                .position(|entry| entry.member == *member)
        })
    }

    /// Adds or updates a member. Returns `true` if a new member was added or
    /// an existing member's score actually changed.
    pub fn add(&mut self, score: f64, member: Bytes) -> bool {
        if let Some(old_score) = self.members.insert(member.clone(), score) {
            if old_score == score {
                return false;
            }
            self.sorted.remove(&MemberEntry {
                score: old_score,
                member: member.clone(),
            });
        }
        self.sorted.insert(MemberEntry { score, member });
        true
    }

    /// Removes a member. Returns `true` if the member was present.
    pub fn remove(&mut self, member: &Bytes) -> bool {
        if let Some(score) = self.members.remove(member) {
            self.sorted.remove(&MemberEntry {
                score,
                member: member.clone(),
            });
            true
        } else {
            false
        }
    }

    /// Applies one `ZADD` invocation to this set.
    pub fn add_or_update(
        &mut self,
        members: &[MemberEntry],
        opts: &ZAddOptions,
    ) -> Result<ZAddResult, ZSetError> {
        opts.validate()?;

        if opts.incr {
            if members.len() != 1 {
                return Err(ZSetError::IncompatibleOptions(
                    "INCR option supports a single score/member pair",
                ));
            }
            return self.increment(&members[0], opts);
        }

        let mut added = 0;
        let mut changed = 0;

        for entry in members {
            let current = self.get_score(&entry.member);

            match opts.policy {
                UpdatePolicy::OnlyIfAbsent if current.is_some() => continue,
                UpdatePolicy::OnlyIfExists if current.is_none() => continue,
                _ => {}
            }
            if let Some(old) = current
                && ((opts.comparison == Comparison::OnlyIfGreater && entry.score <= old)
                    || (opts.comparison == Comparison::OnlyIfLess && entry.score >= old))
            {
                continue;
            }

            if self.add(entry.score, entry.member.clone()) {
                if current.is_none() {
                    added += 1;
                }
                changed += 1;
            }
        }

        Ok(ZAddResult::Count(if opts.ch { changed } else { added }))
    }

    /// The `INCR` path of `add_or_update`: the entry's score is an increment
    /// applied to the member's current score (or its score when absent). A
    /// blocked update is a successful no-op reporting the current score.
    fn increment(
        &mut self,
        entry: &MemberEntry,
        opts: &ZAddOptions,
    ) -> Result<ZAddResult, ZSetError> {
        let current = self.get_score(&entry.member);

        match opts.policy {
            UpdatePolicy::OnlyIfAbsent if current.is_some() => {
                return Ok(ZAddResult::IncrScore(current));
            }
            UpdatePolicy::OnlyIfExists if current.is_none() => {
                return Ok(ZAddResult::IncrScore(None));
            }
            _ => {}
        }

        let updated = current.unwrap_or(0.0) + entry.score;
        if updated.is_nan() {
            return Err(ZSetError::NanScore);
        }
        if let Some(old) = current
            && ((opts.comparison == Comparison::OnlyIfGreater && updated <= old)
                || (opts.comparison == Comparison::OnlyIfLess && updated >= old))
        {
            return Ok(ZAddResult::IncrScore(Some(old)));
        }

        self.add(updated, entry.member.clone());
        Ok(ZAddResult::IncrScore(Some(updated)))
    }

    /// Removes up to `count` members from the given end of the ordering and
    /// returns them as a new set with their scores preserved.
    pub fn pop(&mut self, count: i64, side: PopSide) -> Result<SortedSet, ZSetError> {
        if count <= 0 {
            return Err(ZSetError::InvalidCount);
        }

        let mut popped = SortedSet::new();
        for _ in 0..count {
            let entry = match side {
                PopSide::Min => self.sorted.pop_first(),
                PopSide::Max => self.sorted.pop_last(),
            };
            match entry {
                Some(entry) => {
                    self.members.remove(&entry.member);
                    popped.add(entry.score, entry.member);
                }
                None => break,
            }
        }
        Ok(popped)
    }

    /// Counts members with a score in `[min, max]`, both ends inclusive.
    pub fn count_score_range(&self, min: f64, max: f64) -> usize {
        self.sorted
            .iter()
            .filter(|entry| entry.score >= min && entry.score <= max)
            .count()
    }

    /// Removes members with a score in `[min, max]`, both ends inclusive.
    pub fn remove_score_range(&mut self, min: f64, max: f64) -> usize {
        let doomed: Vec<Bytes> = self
            .sorted
            .iter()
            .filter(|entry| entry.score >= min && entry.score <= max)
            .map(|entry| entry.member.clone())
            .collect();
        for member in &doomed {
            self.remove(member);
        }
        doomed.len()
    }

    /// Removes members whose bytes fall in the lexicographic range.
    pub fn remove_lex_range(&mut self, range: &LexRange) -> usize {
        let doomed: Vec<Bytes> = self
            .sorted
            .iter()
            .filter(|entry| range.contains(&entry.member))
            .map(|entry| entry.member.clone())
            .collect();
        for member in &doomed {
            self.remove(member);
        }
        doomed.len()
    }

    /// Whether every member carries the same score. This is the precondition
    /// for the lexicographic range commands.
    pub fn scores_all_equal(&self) -> bool {
        let mut scores = self.members.values();
        match scores.next() {
            Some(first) => scores.all(|s| s == first),
            None => true,
        }
    }
}

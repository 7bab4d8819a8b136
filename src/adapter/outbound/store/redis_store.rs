//! Redis sorted-set leaderboard store.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::domain::ScoredCandidate;
use crate::error::StoreError;
use crate::port::outbound::LeaderboardStore;

/// Publishes each leaderboard as a sorted set scored by composite.
///
/// Members are JSON objects `{"rank": n, ...}` so readers can recover the
/// exact order even when composites tie. The delete and the insert run in
/// one `MULTI`/`EXEC` transaction: readers see the old set or the new one,
/// never an empty key in between (unless the new leaderboard is empty).
pub struct RedisStore {
    client: ::redis::Client,
}

impl RedisStore {
    /// Create a store for `url`. No connection is made until the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not a valid Redis connection string.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: ::redis::Client::open(url)?,
        })
    }
}

/// Stored form of one leaderboard entry: its 1-based rank plus the scores.
#[derive(Debug, Serialize)]
struct RankedEntry<'a> {
    rank: usize,
    #[serde(flatten)]
    entry: &'a ScoredCandidate,
}

/// `(score, member)` pairs for `ZADD`, in rank order.
fn members(entries: &[ScoredCandidate]) -> Result<Vec<(f64, String)>, StoreError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let member = serde_json::to_string(&RankedEntry {
                rank: i + 1,
                entry,
            })
            .map_err(StoreError::Encode)?;
            Ok((entry.composite, member))
        })
        .collect()
}

/// `MULTI`, `DEL key`, `ZADD key ...` when there are members, `EXEC`.
fn replace_pipeline(key: &str, members: &[(f64, String)]) -> ::redis::Pipeline {
    let mut pipe = ::redis::pipe();
    pipe.atomic().del(key).ignore();
    if !members.is_empty() {
        pipe.zadd_multiple(key, members).ignore();
    }
    pipe
}

#[async_trait]
impl LeaderboardStore for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn replace(&self, key: &str, entries: &[ScoredCandidate]) -> Result<(), StoreError> {
        let members = members(entries)?;
        let mut conn = self.client.get_multiplexed_tokio_connection().await?;

        replace_pipeline(key, &members)
            .query_async::<_, ()>(&mut conn)
            .await?;

        debug!(key, entries = members.len(), "Redis leaderboard replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_carry_rank_and_scores() {
        let entries = vec![
            ScoredCandidate {
                chain: "1".into(),
                address: "0xa".into(),
                series_id: "a".into(),
                return_ratio: 2.5,
                security_score: 9.0,
                composite: 1.9,
            },
            ScoredCandidate {
                chain: "1".into(),
                address: "0xb".into(),
                series_id: "b".into(),
                return_ratio: 1.0,
                security_score: 8.0,
                composite: 1.2,
            },
        ];

        let members = members(&entries).unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[1].0, 1.2);
        let second: serde_json::Value = serde_json::from_str(&members[1].1).unwrap();
        assert_eq!(second["rank"], 2);
        assert_eq!(second["address"], "0xb");
        assert_eq!(second["composite"], 1.2);
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(RedisStore::open("not a url").is_err());
    }

    fn packed(pipe: &::redis::Pipeline) -> String {
        String::from_utf8_lossy(&pipe.get_packed_pipeline()).into_owned()
    }

    fn position(haystack: &str, command: &str) -> usize {
        haystack
            .find(&format!("\r\n{command}\r\n"))
            .unwrap_or_else(|| panic!("{command} missing from {haystack:?}"))
    }

    #[test]
    fn replace_deletes_then_adds_inside_one_transaction() {
        let members = vec![(1.9, "{\"rank\":1}".to_string()), (1.2, "{\"rank\":2}".to_string())];
        let commands = packed(&replace_pipeline("board", &members));

        let multi = position(&commands, "MULTI");
        let del = position(&commands, "DEL");
        let zadd = position(&commands, "ZADD");
        let exec = position(&commands, "EXEC");
        assert!(multi < del && del < zadd && zadd < exec, "{commands:?}");
        assert!(commands.starts_with("*1\r\n$5\r\nMULTI"));
        assert_eq!(commands.matches("ZADD").count(), 1);
    }

    #[test]
    fn empty_board_only_deletes() {
        let commands = packed(&replace_pipeline("board", &[]));

        assert!(position(&commands, "DEL") < position(&commands, "EXEC"));
        assert!(!commands.contains("ZADD"));
    }
}

//! Users granted an upload slot regardless of the slot limit.

use crate::net::UserId;
use crate::session::HubId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub hub: HubId,
    pub uid: UserId,
    pub name: String,
}

impl Grant {
    /// User id as shown to the user and accepted by [`Grants::find`].
    pub fn hex_id(&self) -> String {
        format!("{:016x}", self.uid)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GrantError {
    #[error("No granted user matches '{0}'.")]
    NotFound(String),
    #[error("'{query}' is ambiguous, it matches {}.", .candidates.join(", "))]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },
}

#[derive(Debug, Default)]
pub struct Grants {
    entries: Vec<Grant>,
}

impl Grants {
    /// Returns false if the user already holds a grant on that hub.
    pub fn grant(&mut self, hub: HubId, uid: UserId, name: &str) -> bool {
        if self.entries.iter().any(|g| g.hub == hub && g.uid == uid) {
            return false;
        }
        tracing::debug!(hub, uid, name, "slot granted");
        self.entries.push(Grant {
            hub,
            uid,
            name: name.to_string(),
        });
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grant> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a user typed as a name or a hex id prefix.
    ///
    /// A case-insensitive name match wins over an id prefix match. Either
    /// rule must single out one grant; several matches are ambiguous.
    pub fn find(&self, query: &str) -> Result<usize, GrantError> {
        let by_name: Vec<usize> = self
            .positions(|g| g.name.eq_ignore_ascii_case(query))
            .collect();
        if !by_name.is_empty() {
            return self.single(query, by_name);
        }

        let prefix = query.to_ascii_lowercase();
        if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            let by_id: Vec<usize> = self.positions(|g| g.hex_id().starts_with(&prefix)).collect();
            if !by_id.is_empty() {
                return self.single(query, by_id);
            }
        }
        Err(GrantError::NotFound(query.to_string()))
    }

    /// Remove the grant [`find`](Self::find) resolves `query` to.
    pub fn revoke(&mut self, query: &str) -> Result<Grant, GrantError> {
        let index = self.find(query)?;
        let grant = self.entries.remove(index);
        tracing::debug!(hub = grant.hub, uid = grant.uid, "slot revoked");
        Ok(grant)
    }

    /// Distinct names starting with `prefix`, case-insensitively.
    pub fn names(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|g| g.name.to_lowercase().starts_with(&prefix))
            .map(|g| g.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    fn positions<'a>(&'a self, pred: impl Fn(&Grant) -> bool + 'a) -> impl Iterator<Item = usize> + 'a {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, g)| pred(g))
            .map(|(i, _)| i)
    }

    fn single(&self, query: &str, matches: Vec<usize>) -> Result<usize, GrantError> {
        match matches.as_slice() {
            [index] => Ok(*index),
            _ => Err(GrantError::Ambiguous {
                query: query.to_string(),
                candidates: matches
                    .iter()
                    .map(|&i| {
                        let g = &self.entries[i];
                        format!("{} ({})", g.name, g.hex_id())
                    })
                    .collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grants() -> Grants {
        let mut grants = Grants::default();
        grants.grant(1, 0xabc0_0000_0000_0001, "Alice");
        grants.grant(1, 0xabc0_0000_0000_0002, "bob");
        grants.grant(2, 0x1230_0000_0000_0003, "bob");
        grants.grant(2, 0xdead_0000_0000_0004, "abc");
        grants
    }

    #[test]
    fn granting_twice_is_a_no_op() {
        let mut grants = grants();
        assert!(!grants.grant(1, 0xabc0_0000_0000_0001, "Alice"));
        assert_eq!(grants.iter().count(), 4);
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let mut grants = grants();
        let revoked = grants.revoke("alice").unwrap();
        assert_eq!(revoked.name, "Alice");
        assert_eq!(grants.iter().count(), 3);
    }

    #[test]
    fn unique_id_prefix() {
        let grants = grants();
        let index = grants.find("123").unwrap();
        assert_eq!(grants.iter().nth(index).unwrap().hub, 2);
    }

    #[test]
    fn name_match_wins_over_id_prefix() {
        // "abc" is both a user name and a prefix of two ids.
        let grants = grants();
        let index = grants.find("ABC").unwrap();
        assert_eq!(grants.iter().nth(index).unwrap().name, "abc");
    }

    #[test]
    fn ambiguous_matches_are_reported() {
        let grants = grants();
        let err = grants.find("bob").unwrap_err();
        assert!(matches!(err, GrantError::Ambiguous { ref candidates, .. } if candidates.len() == 2));

        let err = grants.find("abc0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'abc0' is ambiguous, it matches Alice (abc0000000000001), bob (abc0000000000002)."
        );
    }

    #[test]
    fn nothing_matches() {
        let mut grants = grants();
        assert_eq!(grants.revoke("carol"), Err(GrantError::NotFound("carol".into())));
        assert_eq!(grants.revoke("f00"), Err(GrantError::NotFound("f00".into())));
        assert_eq!(grants.iter().count(), 4);
    }

    #[test]
    fn name_suggestions() {
        let grants = grants();
        assert_eq!(grants.names("B"), vec!["bob"]);
        assert_eq!(grants.names(""), vec!["Alice", "abc", "bob"]);
    }
}

//! Turn pairing: match each local-author turn with its nearest preceding
//! counterpart turn.
//!
//! The original system did this with a correlated `MAX(min_date) < my.min_date`
//! subquery. Here a single forward pass suffices: turn start timestamps are
//! non-decreasing, so a candidate index into the counterpart list only ever
//! advances, giving O(n) per conversation.

use crate::pipeline::types::{Turn, TurnPair};

/// Pairs the local-author turns of one conversation.
///
/// For each local-author turn the context is the counterpart turn with the
/// greatest `start_timestamp` strictly before the response's; only that
/// single nearest turn, never a concatenation. Turns with no qualifying
/// counterpart (the conversation opener, or a fully tied timestamp frontier)
/// produce a pair with no context rather than being skipped.
pub fn pair_turns(turns: &[Turn]) -> Vec<TurnPair> {
    let counterparts: Vec<&Turn> = turns.iter().filter(|t| !t.is_local_author).collect();

    let mut pairs = Vec::new();
    let mut candidate: Option<usize> = None;
    let mut next = 0;

    for response in turns.iter().filter(|t| t.is_local_author) {
        // Advance to the last counterpart strictly before this response.
        // "Strictly" matters: a counterpart sharing the response's timestamp
        // is not usable as context.
        while next < counterparts.len()
            && counterparts[next].start_timestamp < response.start_timestamp
        {
            candidate = Some(next);
            next += 1;
        }

        pairs.push(TurnPair {
            context: candidate.map(|i| counterparts[i].clone()),
            response: response.clone(),
        });
    }

    pairs
}

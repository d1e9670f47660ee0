// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-user venue scoping.
//!
//! Users without full city access only ever see their assigned venues,
//! whatever the UI asked for.

use crate::types::UserAccessContext;

/// Applies the user's venue restrictions to a requested venue.
///
/// Rules for users without full city access:
/// - exactly one assigned venue: that venue is always used
/// - several assigned venues: an allowed selection passes through, an
///   empty or disallowed one is replaced by all assigned venues, comma-joined
/// - no assigned venues: the selection passes through unchanged
///
/// Users with full city access, and requests without a user, are not
/// restricted.
#[must_use]
pub fn scope_venue(requested: Option<String>, user: Option<&UserAccessContext>) -> Option<String> {
    let Some(user) = user else {
        return requested;
    };
    if user.has_full_city_access() {
        return requested;
    }

    match user.assigned_venues.as_slice() {
        [] => requested,
        [only] => {
            if requested.as_deref().is_some_and(|venue| venue != only) {
                tracing::debug!(
                    requested = requested.as_deref(),
                    assigned = only.as_str(),
                    "overriding venue selection with the single assigned venue"
                );
            }
            Some(only.clone())
        }
        assigned => match requested {
            Some(venue) if assigned.iter().any(|allowed| *allowed == venue) => Some(venue),
            other => {
                if other.is_some() {
                    tracing::debug!(
                        requested = other.as_deref(),
                        "venue selection not allowed; using all assigned venues"
                    );
                }
                Some(assigned.join(","))
            }
        },
    }
}

/// Returns whether the user may see data for `venue`.
#[must_use]
pub fn can_access_venue(user: &UserAccessContext, venue: &str) -> bool {
    user.has_full_city_access()
        || user.assigned_venues.is_empty()
        || user.assigned_venues.iter().any(|allowed| allowed == venue)
}

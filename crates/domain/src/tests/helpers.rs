// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use time::macros::date;

use crate::{Role, UserAccessContext};

pub const fn test_today() -> Date {
    date!(2025 - 06 - 15)
}

pub fn create_test_admin() -> UserAccessContext {
    UserAccessContext::new(true, Role::Admin, Vec::new(), Some(String::from("org-1")))
}

pub fn create_single_venue_user(venue: &str) -> UserAccessContext {
    UserAccessContext::new(
        false,
        Role::User,
        vec![String::from(venue)],
        Some(String::from("org-42")),
    )
}

pub fn create_multi_venue_user(venues: &[&str]) -> UserAccessContext {
    UserAccessContext::new(
        false,
        Role::User,
        venues.iter().map(|v| String::from(*v)).collect(),
        Some(String::from("org-42")),
    )
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Role, UserAccessContext, can_access_venue, scope_venue};

use super::helpers::{create_multi_venue_user, create_single_venue_user, create_test_admin};

#[test]
fn test_no_user_passes_selection_through() {
    assert_eq!(
        scope_venue(Some(String::from("Rio")), None),
        Some(String::from("Rio"))
    );
    assert_eq!(scope_venue(None, None), None);
}

#[test]
fn test_full_access_passes_selection_through() {
    let admin: UserAccessContext = create_test_admin();
    assert_eq!(scope_venue(None, Some(&admin)), None);

    let marketing: UserAccessContext =
        UserAccessContext::new(false, Role::Marketing, vec![String::from("Rio")], None);
    assert_eq!(
        scope_venue(Some(String::from("Recife")), Some(&marketing)),
        Some(String::from("Recife"))
    );
}

#[test]
fn test_single_venue_overrides_selection() {
    let user: UserAccessContext = create_single_venue_user("Rio");
    assert_eq!(scope_venue(None, Some(&user)), Some(String::from("Rio")));
    assert_eq!(
        scope_venue(Some(String::from("São Paulo")), Some(&user)),
        Some(String::from("Rio"))
    );
}

#[test]
fn test_multi_venue_allowed_selection_passes() {
    let user: UserAccessContext = create_multi_venue_user(&["Rio", "Niterói"]);
    assert_eq!(
        scope_venue(Some(String::from("Niterói")), Some(&user)),
        Some(String::from("Niterói"))
    );
}

#[test]
fn test_multi_venue_disallowed_or_empty_selection_uses_all_assigned() {
    let user: UserAccessContext = create_multi_venue_user(&["Rio", "Niterói"]);
    assert_eq!(
        scope_venue(Some(String::from("Recife")), Some(&user)),
        Some(String::from("Rio,Niterói"))
    );
    assert_eq!(
        scope_venue(None, Some(&user)),
        Some(String::from("Rio,Niterói"))
    );
}

#[test]
fn test_can_access_venue() {
    let user: UserAccessContext = create_multi_venue_user(&["Rio", "Niterói"]);
    assert!(can_access_venue(&user, "Rio"));
    assert!(!can_access_venue(&user, "Recife"));
    assert!(can_access_venue(&create_test_admin(), "Recife"));
}

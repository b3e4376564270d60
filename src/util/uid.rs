//! Uid helpers.

/// Uids reserved per user; a uid is `user_id * PER_USER_RANGE + app_id`.
pub const PER_USER_RANGE: u32 = 100_000;

/// Application id of a uid, stripping the user component.
pub const fn app_id(uid: u32) -> u32 {
    uid % PER_USER_RANGE
}

/// User id of a uid.
pub const fn user_id(uid: u32) -> u32 {
    uid / PER_USER_RANGE
}

/// Whether `uid` passes an optional app-id filter.
pub const fn matches_app_id(uid: u32, filter_app_id: Option<u32>) -> bool {
    match filter_app_id {
        Some(app) => app_id(uid) == app,
        None => true,
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod event;

#[cfg(test)]
mod tests;

pub use availability::{Availability, DEFAULT_RETRY_INTERVAL, FunctionAvailability};
pub use event::{ActivityEvent, ActivityKind};

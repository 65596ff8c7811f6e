// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers for seeding stores in tests.

use purview_core::RawTagRecord;

/// Build a raw tag record from the conventional attributes.
pub fn tag_record(to: &str, what: &str, when: &str, who: &str, release: bool) -> RawTagRecord {
    RawTagRecord::new()
        .with("to", to)
        .with("what", what)
        .with("when", when)
        .with("who", who)
        .with("release", release)
}

/// Build a raw tag record carrying an administrative-tag qualifier.
pub fn admin_scoped_tag_record(
    to: &str,
    when: &str,
    who: &str,
    release: bool,
    admin_tag: &str,
) -> RawTagRecord {
    tag_record(to, "collection", when, who, release).with("tag", admin_tag)
}

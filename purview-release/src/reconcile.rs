// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;

use purview_core::Target;

use crate::decision::ReleaseDecision;

/// Fold previously published state into a freshly computed decision.
///
/// Every previously published target absent from the fresh decision is added
/// as `released: false`: once a target has been told "released", silence on
/// a later resolution means revocation, not "no change". Targets the fresh
/// decision already covers keep their freshly computed value. Idempotent for
/// fixed inputs.
pub fn reconcile(
    mut decision: ReleaseDecision,
    previously_published: &HashSet<Target>,
) -> ReleaseDecision {
    for target in previously_published {
        if !decision.contains(target) {
            decision.insert(target.clone(), false);
        }
    }

    decision
}

use vql_codec::Code;

/// Outcome of `Upgrade` (`spec.md` §4.8): the freshly bound `vendorCode`
/// and the first queue's `queueCode`.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeOutcome {
    pub vendor_code: Code,
    pub queue_code: Code,
}

/// Outcome of `Update` (`spec.md` §4.8). `queue_code` is `Some` only when
/// `requireInitQueue` triggered a reset.
#[derive(Debug, Clone, Copy)]
pub struct UpdateOutcome {
    pub queue_code: Option<Code>,
    pub reset_count: Option<i64>,
}

/// Outcome of `Detail` (`spec.md` §4.8).
#[derive(Debug, Clone)]
pub struct DetailOutcome {
    pub name: String,
    pub caption: String,
}

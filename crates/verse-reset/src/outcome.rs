use verse_core::{ModeTuple, Region};

/// The result of applying a set of fired resets to one agent (§4.3).
#[derive(Clone, Debug)]
pub struct ResetOutcome {
    /// Every successor mode tuple the Cartesian expansion produced. Empty
    /// iff `no_successor` is `true`.
    pub dest_modes: Vec<ModeTuple>,

    /// The successor continuous region: unmodified dimensions inherit the
    /// agent's current region, reset dimensions hold the evaluated result.
    pub successor_region: Region,

    /// `true` when a guard fired but every reset path's `val` evaluated to
    /// an empty candidate list, so no concrete successor mode exists (§4.3,
    /// §7 "no-successor-mode warnings").
    pub no_successor: bool,
}

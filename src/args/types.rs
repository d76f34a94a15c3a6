/// How the results of a run are presented on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
    Html,
    Live,
}

impl OutputMode {
    /// Table and live output write terminal escape codes.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Table | Self::Live)
    }
}

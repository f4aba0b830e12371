use crate::system::snapshot::SortKey;

/// What a keypress asks the monitor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SortBy(SortKey),
    None,
}

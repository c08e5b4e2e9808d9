use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Date,
    Save,
}

/// Store mutations triggered by a gesture. Offsets refer to the list as it
/// was rendered when the key was pressed.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Submit,
    Delete(BTreeSet<usize>),
    Move(BTreeSet<usize>, usize), // Sources, destination offset
    Quit,
}

//! User actions for the TUI application

/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Tick event for toast expiry
    Tick,
    /// Render the UI
    Render,
    /// Navigate selection up
    Up,
    /// Navigate selection down
    Down,
    /// Jump to first row
    First,
    /// Jump to last row
    Last,
    NextPage,
    PreviousPage,
    /// Switch to the next resource tab
    NextTab,
    PreviousTab,
    /// Refetch the current list
    Refresh,
    /// Open the create form
    Create,
    /// Open the edit form for the selected row
    Edit,
    /// Ask to delete the selected row
    Delete,
    /// Go back / close popup
    Back,
    /// Show help popup
    Help,
    /// Start search mode
    StartSearch,
    /// Update search query
    SearchInput(char),
    /// Backspace in search
    SearchBackspace,
    /// Run the search
    SubmitSearch,
    /// Move to the next form field
    FieldNext,
    FieldPrevious,
    FieldInput(char),
    FieldBackspace,
    /// Save the open form
    SubmitForm,
    /// Answer yes to a confirmation prompt
    Confirm,
    /// Answer no to a confirmation prompt
    Deny,
    /// No operation
    None,
}

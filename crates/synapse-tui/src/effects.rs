//! Effects requested by the reducer and executed by the runtime.

use synapse_core::search::SearchRequest;

/// Side effects the reducer asks the runtime to perform. The reducer never
/// spawns tasks or touches the terminal itself.
#[derive(Debug)]
pub enum UiEffect {
    /// Exit the event loop and restore the terminal.
    Quit,
    /// Send the current conversation to the search service in the background.
    StartSearch { request: SearchRequest },
}

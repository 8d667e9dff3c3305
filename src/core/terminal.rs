//! Terminal trait and lifecycle helpers.

/// Minimal terminal interface for the runtime.
pub trait Terminal {
    /// Start the terminal with input and resize handlers.
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()>;

    /// Stop the terminal and restore state.
    fn stop(&mut self) -> std::io::Result<()>;

    /// Write output to the terminal.
    fn write(&mut self, data: &str);

    /// Terminal dimensions.
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
}

/// RAII guard that stops the terminal on drop.
pub struct TerminalGuard<T: Terminal> {
    terminal: Option<T>,
}

impl<T: Terminal> TerminalGuard<T> {
    pub fn new(terminal: T) -> Self {
        Self {
            terminal: Some(terminal),
        }
    }

    /// Access the wrapped terminal.
    pub fn terminal_mut(&mut self) -> &mut T {
        self.terminal
            .as_mut()
            .expect("terminal already taken from guard")
    }

    /// Consume the guard without running cleanup.
    pub fn into_inner(mut self) -> T {
        self.terminal
            .take()
            .expect("terminal already taken from guard")
    }
}

impl<T: Terminal> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        if let Some(terminal) = self.terminal.as_mut() {
            let _ = terminal.stop();
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SlideshowState {
    Idle,      // Waiting for the user to press start
    Running,   // Countdown armed, advancing on expiry or click
    Exhausted, // Every photo has been shown, only exit remains
}

/// What the shell should do after handing an action to the session.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ShellCommand {
    Continue,
    Exit,
}
